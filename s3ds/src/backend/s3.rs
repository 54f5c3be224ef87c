use bytes::Bytes;
use futures_util::StreamExt;
use object_store::{
    aws::{AmazonS3, AmazonS3Builder},
    path::Path,
    ClientOptions, ObjectStore, PutPayload,
};
use s3ds_core::Error;
use tokio::sync::OnceCell;
use url::Url;

use super::{ObjectBackend, ObjectMeta};
use crate::{options::S3Options, BackendError};

/// Amazon S3, or any S3 compatible service, accessed through `object_store`.
///
/// The client is built on first use and reused afterwards. Concurrent first calls are
/// serialized, so exactly one client is ever constructed.
pub struct AmazonS3Backend {
    bucket: String,
    options: S3Options,
    client: OnceCell<AmazonS3>,
}

impl AmazonS3Backend {
    pub fn new(bucket: impl Into<String>, options: S3Options) -> Result<Self, Error> {
        let bucket = bucket.into().trim_matches('/').to_string();
        if bucket.is_empty() {
            return Err(Error::Config {
                message: "bucket name must not be empty".into(),
            });
        }
        if let Some(endpoint) = options.endpoint.as_deref() {
            Url::parse(endpoint).map_err(|err| Error::Config {
                message: format!("invalid endpoint {endpoint:?}: {err}"),
            })?;
        }

        Ok(Self {
            bucket,
            options,
            client: OnceCell::new(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn options(&self) -> &S3Options {
        &self.options
    }

    async fn client(&self) -> Result<&AmazonS3, BackendError> {
        self.client
            .get_or_try_init(|| async { self.build_client() })
            .await
    }

    fn build_client(&self) -> Result<AmazonS3, BackendError> {
        tracing::debug!(
            bucket = %self.bucket,
            region = %self.options.region,
            endpoint = ?self.options.endpoint,
            "building s3 client"
        );

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&self.bucket)
            .with_region(&self.options.region)
            .with_allow_http(self.options.allow_http);
        if let Some(access_key) = &self.options.access_key {
            builder = builder.with_access_key_id(access_key);
        }
        if let Some(access_secret) = &self.options.access_secret {
            builder = builder.with_secret_access_key(access_secret);
        }
        if let Some(access_token) = &self.options.access_token {
            builder = builder.with_token(access_token);
        }
        if let Some(endpoint) = &self.options.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if let Some(timeout) = self.options.timeout {
            builder = builder.with_client_options(ClientOptions::new().with_timeout(timeout));
        }

        builder.build().map_err(BackendError::other)
    }
}

/// The deepest whole-segment parent of a raw prefix.
///
/// `object_store` lists by path segment, so a raw S3 prefix like `a/b` has to be listed from
/// `a` and filtered afterwards.
fn list_parent(prefix: &str) -> Option<&str> {
    prefix
        .rfind('/')
        .map(|idx| &prefix[..idx])
        .filter(|parent| !parent.is_empty())
}

/// Object path on the wire, kept byte for byte. `Path::from` percent-encodes characters such as
/// `~` or `#`.
fn wire_path(path: &str) -> Result<Path, BackendError> {
    Path::parse(path).map_err(BackendError::other)
}

fn absent_or(
    err: object_store::Error,
    absent: impl FnOnce() -> BackendError,
) -> BackendError {
    match err {
        object_store::Error::NotFound { .. } => absent(),
        err => BackendError::other(err),
    }
}

impl ObjectBackend for AmazonS3Backend {
    async fn put_object(&self, path: &str, body: Bytes) -> Result<(), BackendError> {
        self.client()
            .await?
            .put(&wire_path(path)?, PutPayload::from(body))
            .await
            .map_err(BackendError::other)?;

        Ok(())
    }

    async fn get_object(&self, path: &str) -> Result<Bytes, BackendError> {
        let result = self
            .client()
            .await?
            .get(&wire_path(path)?)
            .await
            .map_err(|err| {
                absent_or(err, || BackendError::NoSuchKey {
                    path: path.to_string(),
                })
            })?;

        result.bytes().await.map_err(BackendError::other)
    }

    async fn head_object(&self, path: &str) -> Result<ObjectMeta, BackendError> {
        let meta = self
            .client()
            .await?
            .head(&wire_path(path)?)
            .await
            .map_err(|err| {
                absent_or(err, || BackendError::NotFound {
                    path: path.to_string(),
                })
            })?;

        Ok(ObjectMeta {
            path: meta.location.to_string(),
            size: meta.size,
        })
    }

    async fn delete_object(&self, path: &str) -> Result<(), BackendError> {
        self.client()
            .await?
            .delete(&wire_path(path)?)
            .await
            .map_err(BackendError::other)?;

        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>, BackendError> {
        let parent = list_parent(prefix).map(wire_path).transpose()?;
        let mut stream = self.client().await?.list(parent.as_ref());

        let mut objects = Vec::new();
        while let Some(meta) = stream
            .next()
            .await
            .transpose()
            .map_err(BackendError::other)?
        {
            let path = meta.location.to_string();
            if path.starts_with(prefix) {
                objects.push(ObjectMeta {
                    path,
                    size: meta.size,
                });
            }
        }
        tracing::debug!(prefix, listed = objects.len(), "listed s3 objects");

        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_bucket() {
        let err = AmazonS3Backend::new("/", S3Options::default())
            .err()
            .expect("empty bucket accepted");
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let options = S3Options {
            endpoint: Some("not a url".into()),
            ..Default::default()
        };
        let err = AmazonS3Backend::new("bucket", options)
            .err()
            .expect("invalid endpoint accepted");
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn keeps_bucket_and_options() {
        let options = S3Options {
            region: "eu-central-1".into(),
            endpoint: Some("http://localhost:9000".into()),
            allow_http: true,
            ..Default::default()
        };
        let backend = AmazonS3Backend::new("data", options.clone()).unwrap();
        assert_eq!(backend.bucket(), "data");
        assert_eq!(backend.options(), &options);
    }

    #[test]
    fn wire_paths_are_not_encoded() {
        use s3ds_core::Key;

        use crate::mapper::KeyMapper;

        let mapper = KeyMapper::new("folder");
        for raw in [
            "/a~b", "/a#b", "/100%", "/a*b?", "/[x]/{y}", "/a^b|c", "/<a>", "/a\\b", "/\"q\"",
            "/`t`", "/x y/z",
        ] {
            let key = Key::new(raw);
            let object_path = mapper.object_path(&key);
            let wire = wire_path(&object_path).unwrap().to_string();
            assert_eq!(wire, object_path);
            assert_eq!(mapper.key(&wire), key);
        }

        let prefix = mapper.listing_prefix("/a~b/c#");
        let parent = list_parent(&prefix).map(wire_path).transpose().unwrap();
        assert_eq!(parent.unwrap().to_string(), "folder/a~b");
    }

    #[test]
    fn rejects_unrepresentable_paths() {
        assert!(matches!(
            wire_path("a/\u{7}bell"),
            Err(BackendError::Other(_))
        ));
        assert!(matches!(wire_path("a//b"), Err(BackendError::Other(_))));
    }

    #[test]
    fn parent_of_raw_prefix() {
        assert_eq!(list_parent(""), None);
        assert_eq!(list_parent("a"), None);
        assert_eq!(list_parent("a/"), Some("a"));
        assert_eq!(list_parent("a/b"), Some("a"));
        assert_eq!(list_parent("folder/a/b/"), Some("folder/a/b"));
    }

    #[tokio::test]
    async fn builds_client_once() {
        let options = S3Options {
            access_key: Some("user".into()),
            access_secret: Some("password".into()),
            endpoint: Some("http://localhost:9000".into()),
            allow_http: true,
            ..Default::default()
        };
        let backend = AmazonS3Backend::new("data", options).unwrap();

        let first = backend.client().await.unwrap() as *const AmazonS3;
        let second = backend.client().await.unwrap() as *const AmazonS3;
        assert_eq!(first, second);
    }
}
