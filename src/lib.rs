//! # carve-server
//!
//! Embeddable backend for file-carving recovery applications.
//!
//! Accepts an uploaded disk image or file fragment, runs an external
//! file-carving tool (foremost) against it, packages whatever the tool
//! reconstructs into a downloadable zip, and pushes progress events to
//! connected websocket observers.
//!
//! ## Design Philosophy
//!
//! carve-server is designed to be:
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Single workspace** - One job cycle at a time over shared scratch
//!   directories, with overlapping triggers rejected instead of racing
//!
//! ## Quick Start
//!
//! ```no_run
//! use carve_server::{Config, RecoveryService, run_with_shutdown};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let service = RecoveryService::new(config.clone())?;
//!
//!     // Subscribe to progress events
//!     let mut events = service.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("progress: {}", event.progress);
//!         }
//!     });
//!
//!     // Serve the REST API with signal handling
//!     run_with_shutdown(service, config).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Archive packaging of the recovered-file tree
pub mod archive;
/// External file-carving tool invocation
pub mod carver;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Core recovery service
pub mod service;
/// Core types and events
pub mod types;
/// Shared scratch workspace
pub mod workspace;

// Re-export commonly used types
pub use carver::{Carver, CliCarver, NoOpCarver};
pub use config::{ApiConfig, CarverConfig, Config, ServerConfig, WorkspaceConfig};
pub use error::{ApiError, CarverError, Error, ErrorDetail, Result, ToHttpStatus};
pub use service::RecoveryService;
pub use types::{ActionOutcome, ProgressEvent, RecoveryReport, UploadReceipt, UploadedFiles};
pub use workspace::Workspace;

use std::sync::Arc;

/// Run the API server with graceful signal handling.
///
/// Serves the REST API until a termination signal arrives, then returns.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal
///   registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use carve_server::{Config, RecoveryService, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::default();
///     let service = RecoveryService::new(config.clone())?;
///
///     run_with_shutdown(service, config).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(service: RecoveryService, config: Config) -> Result<()> {
    let config = Arc::new(config);

    tokio::select! {
        result = api::start_api_server(service, config) => result,
        () = wait_for_signal() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
