use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl ApplicationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApplicationError::NotFound => StatusCode::NOT_FOUND,
            ApplicationError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApplicationError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApplicationError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApplicationError::StorageError(_)
            | ApplicationError::DatabaseError(_)
            | ApplicationError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Store failures are passed through verbatim; this service is not meant to
// face untrusted clients directly.
impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    #[test]
    fn test_status_codes_follow_error_kind() {
        let cases = [
            (ApplicationError::NotFound, 404),
            (ApplicationError::BadRequest("x".into()), 400),
            (ApplicationError::UnsupportedMediaType("x".into()), 415),
            (ApplicationError::PayloadTooLarge, 413),
            (ApplicationError::StorageError("x".into()), 500),
            (ApplicationError::DatabaseError("x".into()), 500),
            (ApplicationError::InternalError("x".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(err.status_code().as_u16(), code, "{err:?}");
        }
    }

    #[tokio::test]
    async fn test_body_carries_underlying_cause() {
        let response =
            ApplicationError::DatabaseError("table missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "metadata store error: table missing");
    }
}
