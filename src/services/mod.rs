mod error;
mod s3_storage;

pub use error::StorageError;
pub use s3_storage::S3StorageService;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

use crate::{
    application::services::StorageService,
    domain::config::app::{AwsConfig, ObjectStoreConfig},
};

/// Shared AWS configuration for both store clients. Static credentials are
/// used only when both halves are configured; otherwise the SDK's default
/// provider chain applies.
pub async fn load_aws_config(config: &AwsConfig) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key_id), Some(secret_access_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        loader = loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "environment",
        ));
    }

    loader.load().await
}

pub fn create_storage_service(
    sdk_config: &SdkConfig,
    config: &ObjectStoreConfig,
) -> Arc<dyn StorageService> {
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(config.force_path_style)
        .build();
    let client = aws_sdk_s3::Client::from_conf(s3_config);

    Arc::new(S3StorageService::new(client, config.bucket.clone()))
}
