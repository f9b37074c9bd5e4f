//! In-memory store fakes shared by the unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    application::{
        error::ApplicationError,
        repositories::metadata_repository::{ensure_hash, ensure_keys, MetadataRepository},
        services::StorageService,
    },
    domain::models::metadata::FileMetadata,
};

pub const INTERNAL_ENDPOINT: &str = "http://localstack:4566";

/// A minimal JPEG-looking payload: SOI + APP0 marker followed by `tag`.
pub fn jpeg_bytes(tag: &[u8]) -> Bytes {
    let mut content = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00".to_vec();
    content.extend_from_slice(tag);
    content.extend_from_slice(b"\xFF\xD9");
    Bytes::from(content)
}

#[derive(Default)]
pub struct InMemoryStorage {
    objects: Mutex<HashMap<String, Bytes>>,
    pub fail_puts: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub fail_presign: AtomicBool,
}

impl InMemoryStorage {
    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageService for InMemoryStorage {
    async fn put_object(&self, key: &str, content: Bytes) -> Result<(), ApplicationError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(ApplicationError::StorageError("put rejected".to_string()));
        }
        self.objects.lock().unwrap().insert(key.to_string(), content);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), ApplicationError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ApplicationError::StorageError("delete rejected".to_string()));
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn presign_get(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, ApplicationError> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(ApplicationError::StorageError("presign rejected".to_string()));
        }
        Ok(format!(
            "{INTERNAL_ENDPOINT}/test-bucket/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[derive(Default)]
pub struct InMemoryMetadataRepository {
    records: Mutex<Vec<FileMetadata>>,
    pub fail_puts: AtomicBool,
    pub fail_gets: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub fail_queries: AtomicBool,
    /// Yields to the scheduler between the hash query and returning, so
    /// concurrent uploads can interleave.
    pub yield_after_query: AtomicBool,
}

impl InMemoryMetadataRepository {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn count_hash(&self, hash: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.hash == hash)
            .count()
    }
}

fn injected(flag: &AtomicBool, op: &str) -> Result<(), ApplicationError> {
    if flag.load(Ordering::SeqCst) {
        Err(ApplicationError::DatabaseError(format!("{op} rejected")))
    } else {
        Ok(())
    }
}

#[async_trait]
impl MetadataRepository for InMemoryMetadataRepository {
    async fn put_metadata(&self, metadata: &FileMetadata) -> Result<(), ApplicationError> {
        ensure_keys(metadata)?;
        injected(&self.fail_puts, "put")?;
        let mut records = self.records.lock().unwrap();
        records.retain(|m| m.id != metadata.id);
        records.push(metadata.clone());
        Ok(())
    }

    async fn get_metadata(&self, id: &str) -> Result<Option<FileMetadata>, ApplicationError> {
        injected(&self.fail_gets, "get")?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn delete_metadata(&self, id: &str) -> Result<(), ApplicationError> {
        injected(&self.fail_deletes, "delete")?;
        self.records.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<FileMetadata>, ApplicationError> {
        ensure_hash(hash)?;
        injected(&self.fail_queries, "query")?;
        let found = self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.hash == hash)
            .cloned();
        if self.yield_after_query.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        Ok(found)
    }
}
