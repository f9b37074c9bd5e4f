use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, primitives::ByteStream, Client};
use bytes::Bytes;
use tracing::debug;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    services::StorageError,
};

pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn put_object(&self, key: &str, content: Bytes) -> Result<(), ApplicationError> {
        debug!("PUT s3://{}/{} ({} bytes)", self.bucket, key, content.len());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("image/jpeg")
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), ApplicationError> {
        debug!("DELETE s3://{}/{}", self.bucket, key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn presign_get(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ApplicationError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::PresignError(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(StorageError::from)?;

        Ok(request.uri().to_string())
    }

    fn describe(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}
