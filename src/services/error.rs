use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Storage provider error: {0}")]
    ProviderError(String),

    #[error("Presign error: {0}")]
    PresignError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        ApplicationError::StorageError(error.to_string())
    }
}

impl<E, R> From<SdkError<E, R>> for StorageError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        let message = DisplayErrorContext(&error).to_string();
        match error {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                StorageError::NetworkError(message)
            }
            SdkError::ServiceError(_) | SdkError::ResponseError(_) => {
                StorageError::ProviderError(message)
            }
            _ => StorageError::InternalError(message),
        }
    }
}
