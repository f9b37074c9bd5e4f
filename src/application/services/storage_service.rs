use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::error::ApplicationError;

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn put_object(&self, key: &str, content: Bytes) -> Result<(), ApplicationError>;
    async fn delete_object(&self, key: &str) -> Result<(), ApplicationError>;
    /// Signed GET URL for `key`, valid for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration)
        -> Result<String, ApplicationError>;
    /// Short label for logs and the health endpoint.
    fn describe(&self) -> String;
}
