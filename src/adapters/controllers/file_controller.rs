use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{dto::file_dto::FileResponse, state::AppState},
    application::{error::ApplicationError, services::UploadOutcome, validation},
    domain::models::file::FileData,
};

const FILE_FIELD: &str = "file";

pub struct FileController;

impl FileController {
    /// POST /file
    /// Multipart form with a single `file` part.
    pub async fn upload_file(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let file = Self::read_file_field(&mut multipart).await?;

        let outcome = app_state.file_service.create_file(file).await?;
        info!("Upload resolved to file {}", outcome.view().metadata.id);

        let (status, view) = match outcome {
            UploadOutcome::Created(view) => (StatusCode::CREATED, view),
            UploadOutcome::Existing(view) => (StatusCode::OK, view),
        };

        Ok((status, Json(FileResponse::from(view))))
    }

    /// GET /file/{id}
    pub async fn get_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let view = app_state.file_service.get_file(&id).await?;
        Ok(Json(FileResponse::from(view)))
    }

    /// DELETE /file/{id}
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApplicationError> {
        app_state.file_service.delete_file(&id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// Finds the first `file` part that carries a non-empty filename. The extension is
    /// checked before the part's body is read.
    async fn read_file_field(multipart: &mut Multipart) -> Result<FileData, ApplicationError> {
        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let Some(filename) = field
                .file_name()
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
            else {
                continue;
            };

            validation::validate_extension(&filename)?;

            let content = field.bytes().await.map_err(read_error)?;
            info!("Received '{}' ({} bytes)", filename, content.len());

            return Ok(FileData::new(content, filename));
        }

        Err(ApplicationError::BadRequest(
            "no such file: missing form field 'file'".to_string(),
        ))
    }
}

fn form_error(error: MultipartError) -> ApplicationError {
    warn!("Invalid multipart data: {}", error);
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        ApplicationError::BadRequest(format!("invalid multipart form: {}", error.body_text()))
    }
}

fn read_error(error: MultipartError) -> ApplicationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        ApplicationError::InternalError(format!("failed to read file: {}", error.body_text()))
    }
}
