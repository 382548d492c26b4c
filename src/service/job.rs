//! Recovery runs and archive management

use super::RecoveryService;
use crate::archive;
use crate::error::{Error, Result};
use crate::types::RecoveryReport;
use std::path::PathBuf;
use tokio::task::spawn_blocking;
use tracing::{error, info};

/// Route the finished archive is served from
const DOWNLOAD_ROUTE: &str = "/download-zip";

impl RecoveryService {
    /// Run the full recovery pipeline: carve the intake file, enumerate the
    /// reconstructed output, package it into the downloadable archive.
    ///
    /// A trigger while another run holds the workspace is rejected with
    /// `Error::JobBusy` rather than queued. On carver failure the workspace
    /// is left as-is for inspection and no archive is written.
    ///
    /// # Errors
    ///
    /// - `Error::JobBusy` if a recovery run is already in flight
    /// - `Error::EmptyIntake` if nothing has been uploaded (the carver is not
    ///   invoked)
    /// - `Error::Carver` if the external process exits non-zero, carrying its
    ///   stderr text
    /// - `Error::Io` if the output enumeration or archive write fails
    pub async fn run_recovery(&self) -> Result<RecoveryReport> {
        let _guard = self.job_guard.try_lock().map_err(|_| Error::JobBusy)?;

        let input = self
            .workspace
            .first_intake_file()?
            .ok_or(Error::EmptyIntake)?;

        // A fresh run invalidates whatever the previous cycle packaged.
        self.drop_archive();

        info!(input = %input.display(), carver = self.carver.name(), "recovery run started");

        if let Err(e) = self
            .carver
            .carve(&input, self.workspace.recovered())
            .await
        {
            error!(input = %input.display(), error = %e, "recovery run failed");
            return Err(e);
        }

        let recovered_files = self.workspace.list_recovered()?;
        self.build_archive_blocking().await?;

        info!(
            recovered = recovered_files.len(),
            "recovery run complete, archive ready"
        );

        Ok(RecoveryReport {
            download_link: DOWNLOAD_ROUTE.to_string(),
            recovered_files,
        })
    }

    /// Return the archive path, building the archive from the recovered tree
    /// first if no archive file currently exists on disk.
    ///
    /// An existing archive is served as-is; staleness is handled by dropping
    /// the file whenever the workspace is cleared or a new run begins.
    pub async fn ensure_archive(&self) -> Result<PathBuf> {
        let _guard = self.job_guard.lock().await;

        if !self.archive_path().exists() {
            self.build_archive_blocking().await?;
        }

        Ok(self.archive_path().to_path_buf())
    }

    /// Package the recovered tree on the blocking pool.
    ///
    /// Callers must hold the job guard.
    async fn build_archive_blocking(&self) -> Result<u64> {
        let src = self.workspace.recovered().to_path_buf();
        let dest = self.archive_path().to_path_buf();

        spawn_blocking(move || archive::build_archive(&src, &dest))
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::other(format!(
                    "archive task panicked: {}",
                    e
                )))
            })?
    }
}
