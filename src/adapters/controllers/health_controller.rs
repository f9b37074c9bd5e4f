use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

use crate::adapters::state::RuntimeInfo;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub object_store: String,
    pub metadata_backend: String,
    pub uptime_seconds: u64,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub cpu_usage_percent: f32,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /health
    pub async fn health_check(State(runtime_info): State<Arc<RuntimeInfo>>) -> Json<HealthResponse> {
        debug!("Health check requested");

        Json(HealthResponse {
            status: "healthy".to_string(),
            object_store: runtime_info.object_store.clone(),
            metadata_backend: runtime_info.metadata_backend.clone(),
            uptime_seconds: runtime_info.started_at.elapsed().as_secs(),
            metrics: sample_metrics().await,
        })
    }
}

/// CPU usage is a delta, so it needs two refreshes at least
/// `MINIMUM_CPU_UPDATE_INTERVAL` apart.
async fn sample_metrics() -> SystemMetrics {
    // Only refresh what is reported
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let memory_used = sys.used_memory();
    let memory_total = sys.total_memory();
    let memory_usage_percent = if memory_total > 0 {
        (memory_used as f32 / memory_total as f32) * 100.0
    } else {
        0.0
    };

    SystemMetrics {
        cpu_usage_percent: sys.global_cpu_usage(),
        memory_used_bytes: memory_used,
        memory_total_bytes: memory_total,
        memory_usage_percent,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn test_metrics_wait_for_a_second_cpu_sample() {
        let started = Instant::now();
        let metrics = sample_metrics().await;

        assert!(started.elapsed() >= MINIMUM_CPU_UPDATE_INTERVAL);
        assert!((0.0..=100.0).contains(&metrics.cpu_usage_percent));
        assert!(metrics.memory_used_bytes <= metrics.memory_total_bytes);
    }
}
