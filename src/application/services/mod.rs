pub mod file_service;
mod storage_service;

pub use file_service::{FileService, FileView, PresignSettings, UploadOutcome};
pub use storage_service::StorageService;
