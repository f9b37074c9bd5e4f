mod dynamo_metadata_repository;
mod pg_metadata_repository;

pub use dynamo_metadata_repository::DynamoMetadataRepository;
pub use pg_metadata_repository::PgMetadataRepository;

use std::{sync::Arc, time::Duration};

use aws_config::SdkConfig;
use tracing::info;

use crate::{
    application::{error::ApplicationError, repositories::metadata_repository::MetadataRepository},
    domain::config::app::MetadataBackend,
};

pub async fn create_metadata_repository(
    backend: &MetadataBackend,
    sdk_config: &SdkConfig,
) -> Result<Arc<dyn MetadataRepository>, ApplicationError> {
    match backend {
        MetadataBackend::DynamoDb { table, hash_index } => {
            info!("Using DynamoDB table {} (index {})", table, hash_index);
            let client = aws_sdk_dynamodb::Client::new(sdk_config);
            Ok(Arc::new(DynamoMetadataRepository::new(
                client,
                table.clone(),
                hash_index.clone(),
            )))
        }
        MetadataBackend::Postgres { database_url } => {
            info!("Connecting to PostgreSQL...");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(30))
                .connect(database_url)
                .await
                .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

            let repository = PgMetadataRepository::new(pool);
            repository.ensure_schema().await?;
            info!("PostgreSQL metadata schema ready");
            Ok(Arc::new(repository))
        }
    }
}
