use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::metadata::FileMetadata};

#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Stores the record. Implementations reject records with an empty id or hash.
    async fn put_metadata(&self, metadata: &FileMetadata) -> Result<(), ApplicationError>;
    async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, ApplicationError>;
    async fn delete_metadata(&self, id: &str) -> Result<(), ApplicationError>;
    /// First record whose hash matches exactly, if any.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<FileMetadata>, ApplicationError>;
}

pub(crate) fn ensure_keys(metadata: &FileMetadata) -> Result<(), ApplicationError> {
    if metadata.has_keys() {
        Ok(())
    } else {
        Err(ApplicationError::DatabaseError(
            "metadata must have non-empty ID and Hash".to_string(),
        ))
    }
}

pub(crate) fn ensure_hash(hash: &str) -> Result<(), ApplicationError> {
    if hash.is_empty() {
        Err(ApplicationError::DatabaseError(
            "hash cannot be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}
