//! REST API server module
//!
//! Exposes the recovery pipeline over HTTP, plus a websocket endpoint that
//! pushes progress events to connected observers.

use crate::{Config, RecoveryService, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Recovery Pipeline
/// - `POST /upload` - Store one uploaded file, discarding the previous cycle
/// - `POST /delete` - Clear the intake directory, reset observers
/// - `GET /uploaded-files` - List the intake directory
/// - `POST /recover-file` - Run the carver and package the results
/// - `GET /download-zip` - Download the archive (built lazily if absent)
///
/// ## Observation
/// - `GET /progress` - Websocket upgrade; pushes `{"progress": n}` frames
///
/// ## System
/// - `POST /perform-action` - Stub acknowledgment
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive documentation (if enabled)
pub fn create_router(service: RecoveryService, config: Arc<Config>) -> Router {
    let state = AppState::new(service, config.clone());

    let router = Router::new()
        // Recovery pipeline
        .route("/upload", post(routes::upload))
        .route("/delete", post(routes::delete_uploads))
        .route("/uploaded-files", get(routes::uploaded_files))
        .route("/recover-file", post(routes::recover_file))
        .route("/download-zip", get(routes::download_zip))
        // Observation
        .route("/progress", get(routes::progress_socket))
        // System
        .route("/perform-action", post(routes::perform_action))
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec));

    // Merge Swagger UI routes if enabled in config (before applying state)
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state);

    // Uploaded disk images are large; the default 2 MB body limit would
    // reject them outright
    let router = match config.server.api.upload_limit_bytes {
        Some(limit) => router.layer(DefaultBodyLimit::max(limit)),
        None => router.layer(DefaultBodyLimit::disable()),
    };

    // Apply CORS middleware if enabled in config
    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// Allows the specified origins ("*" for any), all methods and all headers.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Creates a TCP listener, binds it to the configured address and serves the
/// router until the process is stopped.
///
/// # Example
///
/// ```no_run
/// use carve_server::{Config, RecoveryService};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let service = RecoveryService::new(config.clone())?;
///
/// // Start API server (blocks until shutdown)
/// carve_server::api::start_api_server(service, Arc::new(config)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(service: RecoveryService, config: Arc<Config>) -> Result<()> {
    let bind_address = config.server.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(service, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(address = %bind_address, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
