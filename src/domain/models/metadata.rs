use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub id: String,
    pub hash: String,
    pub extension: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileMetadata {
    /// Builds the record for a freshly stored file. Timestamps are truncated to
    /// whole seconds so they round-trip through the stores unchanged.
    pub fn new(hash: String, extension: String) -> Self {
        let now = Utc::now().trunc_subsecs(0);
        Self {
            id: Uuid::new_v4().to_string(),
            hash,
            extension,
            created_at: now,
            updated_at: now,
        }
    }

    /// Key of the file's bytes in the object store.
    pub fn object_key(&self) -> String {
        format!("{}{}", self.id, self.extension)
    }

    pub fn has_keys(&self) -> bool {
        !self.id.is_empty() && !self.hash.is_empty()
    }
}
