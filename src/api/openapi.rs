//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the carve-server REST API using
//! utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the carve-server REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "carve-server REST API",
        version = "0.1.0",
        description = "File-carving recovery service: upload an image, run recovery, download the reconstructed files as a zip",
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    paths(
        // Recovery pipeline
        crate::api::routes::upload,
        crate::api::routes::delete_uploads,
        crate::api::routes::uploaded_files,
        crate::api::routes::recover_file,
        crate::api::routes::download_zip,

        // System
        crate::api::routes::perform_action,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::types::UploadReceipt,
            crate::types::UploadedFiles,
            crate::types::RecoveryReport,
            crate::types::ActionOutcome,
            crate::types::ProgressEvent,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "recovery", description = "Upload intake and recovery runs"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json().unwrap();
        assert!(json.contains("/upload"));
        assert!(json.contains("/recover-file"));
        assert!(json.contains("/download-zip"));
    }
}
