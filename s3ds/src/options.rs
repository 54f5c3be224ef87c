use std::{env, fmt, time::Duration};

use serde::Deserialize;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-west-2";

pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const ACCESS_SECRET_ENV: &str = "AWS_SECRET_ACCESS_KEY";
pub const ACCESS_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

/// How a query's `offset` skips entries of the backend listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPolicy {
    /// Skip entry `i` while `i <= offset`, so a non-zero offset skips `offset + 1` entries.
    ///
    /// This is what deployed callers of the datastore observe today and stays the default.
    #[default]
    Inclusive,
    /// Skip exactly `offset` entries.
    Exclusive,
}

impl OffsetPolicy {
    pub fn skips(&self, index: usize, offset: usize) -> bool {
        match self {
            OffsetPolicy::Inclusive => offset > 0 && index <= offset,
            OffsetPolicy::Exclusive => index < offset,
        }
    }
}

/// Connection settings of an S3 backed datastore.
///
/// [`S3Options::default`] reads credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// `AWS_SESSION_TOKEN`. Options are fixed once the datastore is built.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct S3Options {
    /// Scope inside the bucket, e.g. `folder` or `folder/subfolder`.
    pub path: String,
    pub region: String,
    pub access_key: Option<String>,
    pub access_secret: Option<String>,
    /// Only needed for temporary credentials.
    pub access_token: Option<String>,
    /// Custom endpoint for S3 compatible services.
    pub endpoint: Option<String>,
    pub allow_http: bool,
    /// Per request timeout enforced by the HTTP client.
    pub timeout: Option<Duration>,
    pub offset_policy: OffsetPolicy,
}

impl Default for S3Options {
    fn default() -> Self {
        Self {
            path: String::new(),
            region: DEFAULT_REGION.to_string(),
            access_key: env::var(ACCESS_KEY_ENV).ok(),
            access_secret: env::var(ACCESS_SECRET_ENV).ok(),
            access_token: env::var(ACCESS_TOKEN_ENV).ok(),
            endpoint: None,
            allow_http: false,
            timeout: None,
            offset_policy: OffsetPolicy::default(),
        }
    }
}

impl fmt::Debug for S3Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Options")
            .field("path", &self.path)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("access_secret", &self.access_secret.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .field("allow_http", &self.allow_http)
            .field("timeout", &self.timeout)
            .field("offset_policy", &self.offset_policy)
            .finish()
    }
}
