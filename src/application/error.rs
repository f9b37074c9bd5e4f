use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("file not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("file too large")]
    PayloadTooLarge,

    #[error("object store error: {0}")]
    StorageError(String),

    #[error("metadata store error: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    InternalError(String),
}
