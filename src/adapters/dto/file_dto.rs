use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{application::services::FileView, domain::models::metadata::FileMetadata};

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub id: String,
    pub hash: String,
    pub extension: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FileMetadata> for MetadataResponse {
    fn from(metadata: FileMetadata) -> Self {
        Self {
            id: metadata.id,
            hash: metadata.hash,
            extension: metadata.extension,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub metadata: MetadataResponse,
    pub presigned_url: String,
}

impl From<FileView> for FileResponse {
    fn from(view: FileView) -> Self {
        Self {
            metadata: view.metadata.into(),
            presigned_url: view.presigned_url,
        }
    }
}
