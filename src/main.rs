mod adapters;
mod application;
mod domain;
mod services;
#[cfg(test)]
mod testing;

use std::{sync::Arc, time::Instant};

use adapters::{
    repositories::create_metadata_repository,
    router::build_router,
    state::{AppState, RuntimeInfo},
};
use application::services::{FileService, PresignSettings};
use domain::config::app::AppConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Install the process-wide rustls crypto provider before any TLS client is built
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = AppConfig::from_env().expect("ERROR: invalid configuration");

    tracing::info!(
        "Starting jpeg-file-service (bucket: {}, metadata: {})",
        config.object_store.bucket,
        config.metadata.name()
    );

    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Development default
        None => CorsLayer::permissive(),
    };

    let sdk_config = services::load_aws_config(&config.aws).await;

    let storage_service = services::create_storage_service(&sdk_config, &config.object_store);
    let metadata_repository = create_metadata_repository(&config.metadata, &sdk_config)
        .await
        .expect("ERROR: Failed to initialize the metadata store");

    if let Some(rewrite) = &config.object_store.url_rewrite {
        tracing::info!("Presigned URLs will use {} instead of {}", rewrite.to, rewrite.from);
    }

    let runtime_info = RuntimeInfo {
        object_store: storage_service.describe(),
        metadata_backend: config.metadata.name().to_string(),
        started_at: Instant::now(),
    };

    let file_service = FileService::new(
        storage_service,
        metadata_repository,
        PresignSettings {
            expiry: config.object_store.presign_expiry,
            url_rewrite: config.object_store.url_rewrite.clone(),
        },
    );

    let app_state = AppState {
        file_service: Arc::new(file_service),
        runtime_info: Arc::new(runtime_info),
    };

    let router = build_router(app_state, cors, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
