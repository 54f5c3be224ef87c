use std::time::Duration;

use s3ds_core::Error;

use crate::{
    backend::s3::AmazonS3Backend,
    options::{OffsetPolicy, S3Options},
    store::ObjectDatastore,
};

pub type S3Datastore = ObjectDatastore<AmazonS3Backend>;

impl ObjectDatastore<AmazonS3Backend> {
    pub fn new(bucket: impl Into<String>, options: S3Options) -> Result<Self, Error> {
        let path = options.path.clone();
        let offset_policy = options.offset_policy;
        let backend = AmazonS3Backend::new(bucket, options)?;

        Ok(Self::with_backend(backend, path).offset_policy(offset_policy))
    }

    pub fn builder(bucket: impl Into<String>) -> S3DatastoreBuilder {
        S3DatastoreBuilder::new(bucket)
    }
}

/// Builder of an [`S3Datastore`].
///
/// Starts from [`S3Options::default`]; setters and [`S3DatastoreBuilder::configure`] closures
/// are applied in the order they are called.
#[derive(Debug)]
pub struct S3DatastoreBuilder {
    bucket: String,
    options: S3Options,
}

impl S3DatastoreBuilder {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            options: S3Options::default(),
        }
    }

    /// Replaces every option set so far.
    pub fn options(mut self, options: S3Options) -> Self {
        self.options = options;
        self
    }

    pub fn configure(mut self, configure: impl FnOnce(&mut S3Options)) -> Self {
        configure(&mut self.options);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.options.path = path.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.options.region = region.into();
        self
    }

    pub fn credential(
        mut self,
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        self.options.access_key = Some(access_key.into());
        self.options.access_secret = Some(access_secret.into());
        self.options.access_token = access_token;
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.options.endpoint = Some(endpoint.into());
        self
    }

    pub fn allow_http(mut self, allow_http: bool) -> Self {
        self.options.allow_http = allow_http;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn offset_policy(mut self, offset_policy: OffsetPolicy) -> Self {
        self.options.offset_policy = offset_policy;
        self
    }

    pub fn build(self) -> Result<S3Datastore, Error> {
        S3Datastore::new(self.bucket, self.options)
    }
}
