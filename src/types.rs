//! Core types shared between the recovery service and the REST API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Filename the archive is served under on download
pub const DOWNLOAD_FILE_NAME: &str = "recovered_files.zip";

/// Progress event pushed to every connected observer
///
/// Serializes to the wire format `{"progress": <number>}`. The pipeline
/// currently publishes only the reset-to-zero event when the workspace is
/// cleared; the channel carries arbitrary percentages unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProgressEvent {
    /// Completion percentage or phase marker (0-100)
    pub progress: u8,
}

impl ProgressEvent {
    /// Reset marker published when the workspace is cleared
    pub const RESET: ProgressEvent = ProgressEvent { progress: 0 };
}

/// Response to a successful upload
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    /// The filename the blob was stored under, as supplied by the client
    pub file_name: String,
}

/// Listing of the intake directory
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFiles {
    /// Paths relative to the intake root, `/`-separated
    pub uploaded_files: Vec<String>,
}

/// Outcome of a completed recovery run
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryReport {
    /// Route the finished archive can be fetched from
    pub download_link: String,

    /// Every reconstructed file, relative to the recovered root
    pub recovered_files: Vec<String>,
}

/// Acknowledgment for the action stub endpoint
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionOutcome {
    /// Always true; the endpoint performs no work
    pub success: bool,

    /// Human-readable acknowledgment
    pub message: String,
}
