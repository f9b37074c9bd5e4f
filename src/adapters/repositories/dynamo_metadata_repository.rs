use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    application::{
        error::ApplicationError,
        repositories::metadata_repository::{ensure_hash, ensure_keys, MetadataRepository},
    },
    domain::models::metadata::FileMetadata,
};

const ATTR_ID: &str = "ID";
const ATTR_HASH: &str = "Hash";
const ATTR_EXTENSION: &str = "Extension";
const ATTR_CREATED_AT: &str = "CreatedAt";
const ATTR_UPDATED_AT: &str = "UpdatedAt";

type Item = HashMap<String, AttributeValue>;

pub struct DynamoMetadataRepository {
    client: Client,
    table: String,
    hash_index: String,
}

impl DynamoMetadataRepository {
    pub fn new(client: Client, table: String, hash_index: String) -> Self {
        Self {
            client,
            table,
            hash_index,
        }
    }
}

fn db_error<E: std::error::Error>(context: &str, error: E) -> ApplicationError {
    ApplicationError::DatabaseError(format!("{}: {}", context, DisplayErrorContext(error)))
}

fn to_item(metadata: &FileMetadata) -> Item {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(metadata.id.clone())),
        (ATTR_HASH.to_string(), AttributeValue::S(metadata.hash.clone())),
        (
            ATTR_EXTENSION.to_string(),
            AttributeValue::S(metadata.extension.clone()),
        ),
        (
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(metadata.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ),
        (
            ATTR_UPDATED_AT.to_string(),
            AttributeValue::S(metadata.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ),
    ])
}

fn string_attr(item: &Item, name: &str) -> Result<String, ApplicationError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| ApplicationError::DatabaseError(format!("item is missing attribute {name}")))
}

fn time_attr(item: &Item, name: &str) -> Result<DateTime<Utc>, ApplicationError> {
    let raw = string_attr(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ApplicationError::DatabaseError(format!("attribute {name} is not RFC 3339: {e}")))
}

fn from_item(item: &Item) -> Result<FileMetadata, ApplicationError> {
    Ok(FileMetadata {
        id: string_attr(item, ATTR_ID)?,
        hash: string_attr(item, ATTR_HASH)?,
        extension: string_attr(item, ATTR_EXTENSION)?,
        created_at: time_attr(item, ATTR_CREATED_AT)?,
        updated_at: time_attr(item, ATTR_UPDATED_AT)?,
    })
}

#[async_trait]
impl MetadataRepository for DynamoMetadataRepository {
    async fn put_metadata(&self, metadata: &FileMetadata) -> Result<(), ApplicationError> {
        ensure_keys(metadata)?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(metadata)))
            .send()
            .await
            .map_err(|e| db_error("failed to save metadata", e))?;

        Ok(())
    }

    async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, ApplicationError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| db_error("failed to get metadata", e))?;

        output.item().map(from_item).transpose()
    }

    async fn delete_metadata(&self, id: &str) -> Result<(), ApplicationError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| db_error("failed to delete metadata", e))?;

        Ok(())
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<FileMetadata>, ApplicationError> {
        ensure_hash(hash)?;

        let output = self
            .client
            .query()
            .table_name(&self.table)
            .index_name(&self.hash_index)
            .key_condition_expression("#hash = :hash")
            .expression_attribute_names("#hash", ATTR_HASH)
            .expression_attribute_values(":hash", AttributeValue::S(hash.to_string()))
            .limit(1)
            .send()
            .await
            .map_err(|e| db_error("failed to query hash index", e))?;

        output.items().first().map(from_item).transpose()
    }
}
