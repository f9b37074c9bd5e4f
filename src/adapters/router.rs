use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    middleware::log_request,
    state::AppState,
};

pub fn build_router(app_state: AppState, cors: CorsLayer, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(HealthController::health_check))
        .route("/file", post(FileController::upload_file))
        .route(
            "/file/{id}",
            get(FileController::get_file).delete(FileController::delete_file),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(app_state)
}
