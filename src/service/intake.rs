//! Upload intake and workspace clearing

use super::RecoveryService;
use crate::error::{Error, Result};
use crate::types::ProgressEvent;
use std::path::Path;
use tracing::info;

impl RecoveryService {
    /// Store an uploaded blob in the intake directory under its original
    /// filename, discarding the previous cycle's state first.
    ///
    /// Both scratch directories are cleared and the stale archive dropped
    /// before the new blob is written, so at most one intake file exists per
    /// cycle. Returns the stored filename.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoFileUploaded` for an empty filename and `Error::Io`
    /// if the blob cannot be written.
    pub async fn store_upload(&self, file_name: &str, content: &[u8]) -> Result<String> {
        // Only the final path component is honored; a name like "../x" must
        // not escape the intake directory.
        let file_name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(Error::NoFileUploaded)?
            .to_string();

        let _guard = self.job_guard.lock().await;

        self.workspace.clear_all();
        self.drop_archive();

        let dest = self.workspace.intake().join(&file_name);
        tokio::fs::write(&dest, content).await?;

        info!(
            file = %file_name,
            bytes = content.len(),
            "upload stored"
        );

        Ok(file_name)
    }

    /// Clear the intake directory and signal observers to reset.
    ///
    /// The stale archive is dropped along with the intake contents, then a
    /// `{progress: 0}` event is published to every live observer.
    pub async fn clear_uploads(&self) {
        let _guard = self.job_guard.lock().await;

        self.workspace.clear(self.workspace.intake());
        self.drop_archive();

        info!("intake cleared");
        self.publish_progress(ProgressEvent::RESET);
    }

    /// List the intake directory, paths relative to its root.
    pub fn list_uploads(&self) -> Result<Vec<String>> {
        self.workspace.list_intake()
    }

    /// List the recovered directory, paths relative to its root.
    pub fn list_recovered(&self) -> Result<Vec<String>> {
        self.workspace.list_recovered()
    }
}
