use s3ds_core::{BoxedError, Error};
use thiserror::Error;

/// Errors reported by an [`ObjectBackend`](crate::backend::ObjectBackend).
///
/// `NoSuchKey` and `NotFound` mirror the codes S3 answers `GetObject` and `HeadObject` with when
/// no object exists at `path`. Everything else is carried verbatim in `Other`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("NoSuchKey: the specified key does not exist: {path}")]
    NoSuchKey { path: String },
    #[error("NotFound: no object at {path}")]
    NotFound { path: String },
    #[error(transparent)]
    Other(#[from] BoxedError),
}

impl BackendError {
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        BackendError::Other(Box::new(err))
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        Error::backend(err)
    }
}
