//! Recovery run and archive download handlers.

use crate::api::AppState;
use crate::error::Error;
use crate::types::DOWNLOAD_FILE_NAME;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// POST /recover-file - Run the carver against the intake file and package
/// the reconstructed output
#[utoipa::path(
    post,
    path = "/recover-file",
    tag = "recovery",
    responses(
        (status = 200, description = "Recovery finished, archive ready", body = crate::types::RecoveryReport),
        (status = 400, description = "Nothing uploaded", body = crate::error::ApiError),
        (status = 409, description = "A recovery run is already in progress", body = crate::error::ApiError),
        (status = 500, description = "Recovery process or archive build failed", body = crate::error::ApiError)
    )
)]
pub async fn recover_file(State(state): State<AppState>) -> Response {
    match state.service.run_recovery().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!("recovery run failed: {}", e);
            e.into_response()
        }
    }
}

/// GET /download-zip - Download the archive, building it lazily if absent
#[utoipa::path(
    get,
    path = "/download-zip",
    tag = "recovery",
    responses(
        (status = 200, description = "Zip archive of the recovered files", body = Vec<u8>, content_type = "application/zip"),
        (status = 500, description = "Archive build or read failed", body = crate::error::ApiError)
    )
)]
pub async fn download_zip(State(state): State<AppState>) -> Response {
    let path = match state.service.ensure_archive().await {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("failed to build archive for download: {}", e);
            return e.into_response();
        }
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(archive = %path.display(), "failed to open archive: {}", e);
            return Error::Io(e).into_response();
        }
    };

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
        ),
    ];

    (headers, Body::from_stream(ReaderStream::new(file))).into_response()
}
