use std::{sync::Arc, time::Duration};

use tracing::{error, info, warn};

use crate::{
    application::{
        error::ApplicationError, repositories::metadata_repository::MetadataRepository,
        services::StorageService, validation::validate_upload,
    },
    domain::{
        config::app::UrlRewrite,
        models::{file::FileData, metadata::FileMetadata},
    },
};

#[derive(Debug, Clone)]
pub struct PresignSettings {
    pub expiry: Duration,
    pub url_rewrite: Option<UrlRewrite>,
}

#[derive(Debug, Clone)]
pub struct FileView {
    pub metadata: FileMetadata,
    pub presigned_url: String,
}

#[derive(Debug)]
pub enum UploadOutcome {
    Created(FileView),
    /// Same bytes were already stored; nothing was written.
    Existing(FileView),
}

impl UploadOutcome {
    pub fn view(&self) -> &FileView {
        match self {
            UploadOutcome::Created(view) | UploadOutcome::Existing(view) => view,
        }
    }
}

/// Orchestrates uploads, lookups and deletes across the object store and the
/// metadata store. Nothing here is transactional: a failure between the two
/// stores leaves whatever was already written in place.
pub struct FileService {
    storage: Arc<dyn StorageService>,
    metadata: Arc<dyn MetadataRepository>,
    presign: PresignSettings,
}

impl FileService {
    pub fn new(
        storage: Arc<dyn StorageService>,
        metadata: Arc<dyn MetadataRepository>,
        presign: PresignSettings,
    ) -> Self {
        Self {
            storage,
            metadata,
            presign,
        }
    }

    pub async fn create_file(&self, file: FileData) -> Result<UploadOutcome, ApplicationError> {
        let extension = validate_upload(&file)?;
        let hash = file.content_hash();

        if let Some(existing) = self.metadata.find_by_hash(&hash).await? {
            info!("Upload of '{}' matches stored file {}", file.filename, existing.id);
            let presigned_url = self.presigned_url(&existing.object_key()).await?;
            return Ok(UploadOutcome::Existing(FileView {
                metadata: existing,
                presigned_url,
            }));
        }

        let metadata = FileMetadata::new(hash, extension);
        let object_key = metadata.object_key();

        self.storage.put_object(&object_key, file.content).await?;

        if let Err(e) = self.metadata.put_metadata(&metadata).await {
            error!("Object {} stored without metadata: {}", object_key, e);
            return Err(e);
        }

        let presigned_url = self.presigned_url(&object_key).await?;
        info!("Stored '{}' as {}", file.filename, object_key);

        Ok(UploadOutcome::Created(FileView {
            metadata,
            presigned_url,
        }))
    }

    pub async fn get_file(&self, id: &str) -> Result<FileView, ApplicationError> {
        let metadata = self.lookup(id).await?;
        let presigned_url = self.presigned_url(&metadata.object_key()).await?;

        Ok(FileView {
            metadata,
            presigned_url,
        })
    }

    pub async fn delete_file(&self, id: &str) -> Result<(), ApplicationError> {
        let metadata = self.lookup(id).await?;
        let object_key = metadata.object_key();

        self.storage.delete_object(&object_key).await?;

        if let Err(e) = self.metadata.delete_metadata(id).await {
            error!("Metadata {} survives its deleted object {}: {}", id, object_key, e);
            return Err(e);
        }

        info!("Deleted file {}", id);
        Ok(())
    }

    /// Signed read URL for `object_key`, with the public-host rewrite applied.
    pub async fn presigned_url(&self, object_key: &str) -> Result<String, ApplicationError> {
        let url = self
            .storage
            .presign_get(object_key, self.presign.expiry)
            .await?;

        Ok(match &self.presign.url_rewrite {
            Some(rewrite) => rewrite.apply(&url),
            None => url,
        })
    }

    // A failing lookup is reported the same way as a missing record.
    async fn lookup(&self, id: &str) -> Result<FileMetadata, ApplicationError> {
        match self.metadata.get_metadata(id).await {
            Ok(Some(metadata)) => Ok(metadata),
            Ok(None) => Err(ApplicationError::NotFound),
            Err(e) => {
                warn!("Metadata lookup for {} failed: {}", id, e);
                Err(ApplicationError::NotFound)
            }
        }
    }
}
