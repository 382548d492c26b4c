//! Error types for carve-server
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (carver invocation, workspace I/O, client input)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for carve-server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for carve-server
///
/// This is the primary error type used throughout the library. Each variant
/// maps to an HTTP status code and a machine-readable error code via
/// [`ToHttpStatus`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "intake_dir")
        key: Option<String>,
    },

    /// Client sent a multipart request without a file field
    #[error("no file present in request")]
    NoFileUploaded,

    /// Recovery was triggered with nothing in the intake directory
    #[error("no uploaded file to recover")]
    EmptyIntake,

    /// A recovery job is already running against the shared workspace
    #[error("a recovery job is already in progress")]
    JobBusy,

    /// External carving process error
    #[error("recovery error: {0}")]
    Carver(#[from] CarverError),

    /// I/O error (workspace traversal, archive write, upload write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation not supported (missing carver binary, not implemented)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Errors from the external file-carving process
#[derive(Debug, Error)]
pub enum CarverError {
    /// The carver binary could not be launched at all
    #[error("failed to launch {tool}: {reason}")]
    Spawn {
        /// Name or path of the binary that failed to start
        tool: String,
        /// The underlying OS error text
        reason: String,
    },

    /// The carver ran but exited with a non-zero status
    #[error("recovery tool exited with code {code:?}")]
    Failed {
        /// Process exit code, if the process exited normally
        code: Option<i32>,
        /// Captured standard-error output, surfaced verbatim to clients
        stderr: String,
    },
}

/// API error response format
///
/// Returned by API endpoints when an error occurs. Machine-readable code,
/// human-readable message, optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "recovery_failed",
///     "message": "recovery tool exited with code Some(1)",
///     "details": {
///       "stderr": "foremost: could not open image"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "empty_intake", "recovery_failed")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    ///
    /// For carver failures this carries the captured stderr text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::NoFileUploaded => 400,
            Error::EmptyIntake => 400,

            // 404 Not Found
            Error::NotFound(_) => 404,

            // 409 Conflict - single-slot workspace already taken
            Error::JobBusy => 409,

            // 500 Internal Server Error - carver and I/O failures
            Error::Carver(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,

            // 501 Not Implemented
            Error::NotSupported(_) => 501,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::NoFileUploaded => "no_file_uploaded",
            Error::EmptyIntake => "empty_intake",
            Error::JobBusy => "job_busy",
            Error::Carver(_) => "recovery_failed",
            Error::Io(_) => "io_error",
            Error::NotFound(_) => "not_found",
            Error::NotSupported(_) => "not_supported",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Carver(CarverError::Failed { code, stderr }) => Some(json!({
                "exit_code": code,
                "stderr": stderr,
            })),
            Error::Carver(CarverError::Spawn { tool, reason }) => Some(json!({
                "tool": tool,
                "reason": reason,
            })),
            Error::Config { key: Some(key), .. } => Some(json!({ "key": key })),
            _ => None,
        };

        Self {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
