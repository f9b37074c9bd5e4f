use axum::extract::FromRef;
use std::{sync::Arc, time::Instant};

use crate::application::services::FileService;

#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub object_store: String,
    pub metadata_backend: String,
    pub started_at: Instant,
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub file_service: Arc<FileService>,
    pub runtime_info: Arc<RuntimeInfo>,
}
