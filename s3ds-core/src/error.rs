use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("datastore: key not found")]
    NotFound,
    #[error("datastore: invalid value type, expected a byte sequence")]
    InvalidValueType,
    #[error("unsupported query: {message}")]
    UnsupportedQuery { message: String },
    #[error("invalid configuration: {message}")]
    Config { message: String },
    /// Anything the storage backend reported, passed through untouched.
    #[error(transparent)]
    Backend(BoxedError),
}

impl Error {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Backend(Box::new(err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
