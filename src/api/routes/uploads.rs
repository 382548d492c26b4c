//! Upload intake handlers.

use crate::api::AppState;
use crate::error::Error;
use crate::types::{UploadReceipt, UploadedFiles};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// POST /upload - Store one uploaded file
///
/// Clears both scratch directories before the new blob is written, so every
/// upload implicitly discards the previous job's state.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "recovery",
    request_body(content = Vec<u8>, description = "File upload (multipart/form-data, field 'file')", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = crate::types::UploadReceipt),
        (status = 400, description = "No file present in request", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file_content: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            if let Some(supplied) = field.file_name() {
                file_name = Some(supplied.to_string());
            }
            match field.bytes().await {
                Ok(bytes) => file_content = Some(bytes.to_vec()),
                Err(e) => {
                    tracing::warn!("failed to read upload field: {}", e);
                    return Error::NoFileUploaded.into_response();
                }
            }
        }
    }

    let (Some(content), Some(name)) = (file_content, file_name) else {
        return Error::NoFileUploaded.into_response();
    };

    match state.service.store_upload(&name, &content).await {
        Ok(file_name) => (StatusCode::OK, Json(UploadReceipt { file_name })).into_response(),
        Err(e) => {
            tracing::error!("failed to store upload: {}", e);
            e.into_response()
        }
    }
}

/// POST /delete - Clear the intake directory
///
/// Also pushes a `{"progress": 0}` reset to every connected observer.
#[utoipa::path(
    post,
    path = "/delete",
    tag = "recovery",
    responses(
        (status = 200, description = "Intake cleared")
    )
)]
pub async fn delete_uploads(State(state): State<AppState>) -> Response {
    state.service.clear_uploads().await;
    StatusCode::OK.into_response()
}

/// GET /uploaded-files - List the intake directory
#[utoipa::path(
    get,
    path = "/uploaded-files",
    tag = "recovery",
    responses(
        (status = 200, description = "Relative paths of uploaded files", body = crate::types::UploadedFiles),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn uploaded_files(State(state): State<AppState>) -> Response {
    match state.service.list_uploads() {
        Ok(uploaded_files) => {
            (StatusCode::OK, Json(UploadedFiles { uploaded_files })).into_response()
        }
        Err(e) => {
            tracing::error!("failed to list intake: {}", e);
            e.into_response()
        }
    }
}
