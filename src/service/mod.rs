//! Core recovery service: job coordination and progress fan-out
//!
//! The `RecoveryService` struct and its methods are organized by domain:
//! - [`intake`] - Upload intake and workspace clearing
//! - [`job`] - Recovery runs and archive management
//!
//! The service owns the single shared workspace. Every workspace-mutating
//! operation serializes on one job guard so overlapping requests cannot
//! interleave reads and writes on the same directories; an explicit recovery
//! trigger while another run is in flight is rejected rather than queued.

mod intake;
mod job;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::carver::{Carver, CliCarver, NoOpCarver};
use crate::config::Config;
use crate::error::Result;
use crate::types::ProgressEvent;
use crate::workspace::Workspace;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Capacity of the progress broadcast channel
///
/// Observers that lag more than this many events skip ahead; publishers are
/// never blocked by slow observers.
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

/// Main recovery service instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct RecoveryService {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// The shared scratch workspace
    pub(crate) workspace: Workspace,
    /// External carving tool (trait object for pluggable implementations)
    pub(crate) carver: Arc<dyn Carver>,
    /// Progress broadcast channel sender (multiple subscribers supported)
    pub(crate) progress_tx: tokio::sync::broadcast::Sender<ProgressEvent>,
    /// Guard serializing the clear -> write -> carve -> package sequence
    pub(crate) job_guard: Arc<tokio::sync::Mutex<()>>,
}

impl RecoveryService {
    /// Create a service from configuration.
    ///
    /// Ensures the scratch directories exist and resolves the carver binary:
    /// an explicit `foremost_path` wins, then PATH discovery if enabled, and
    /// finally the no-op carver so a missing binary surfaces at trigger time
    /// instead of at startup.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the scratch directories cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let carver: Arc<dyn Carver> = match &config.carver.foremost_path {
            Some(path) => Arc::new(
                CliCarver::new(path.clone()).with_extra_args(config.carver.extra_args.clone()),
            ),
            None if config.carver.search_path => match CliCarver::from_path() {
                Some(cli) => Arc::new(cli.with_extra_args(config.carver.extra_args.clone())),
                None => {
                    warn!("foremost not found in PATH, recovery runs will be rejected");
                    Arc::new(NoOpCarver)
                }
            },
            None => Arc::new(NoOpCarver),
        };

        Self::with_carver(config, carver)
    }

    /// Create a service with an explicit carver implementation.
    pub fn with_carver(config: Config, carver: Arc<dyn Carver>) -> Result<Self> {
        let workspace = Workspace::new(&config.workspace);
        workspace.ensure_all()?;

        if let Some(parent) = config.workspace.archive_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let (progress_tx, _rx) = tokio::sync::broadcast::channel(PROGRESS_CHANNEL_CAPACITY);

        info!(
            intake = %workspace.intake().display(),
            recovered = %workspace.recovered().display(),
            carver = carver.name(),
            "recovery service ready"
        );

        Ok(Self {
            config: Arc::new(config),
            workspace,
            carver,
            progress_tx,
            job_guard: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// Current configuration
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Subscribe to progress events.
    ///
    /// Dropping the receiver removes the observer; nothing is buffered or
    /// replayed for observers that join after an event was published.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ProgressEvent> {
        self.progress_tx.subscribe()
    }

    /// Push a progress event to every currently-subscribed observer.
    ///
    /// Fire-and-forget: zero live observers is not an error.
    pub fn publish_progress(&self, event: ProgressEvent) {
        let delivered = self.progress_tx.send(event).unwrap_or(0);
        debug!(progress = event.progress, delivered, "progress published");
    }

    /// Path of the downloadable archive
    pub fn archive_path(&self) -> &Path {
        &self.config.workspace.archive_path
    }

    /// Remove the archive file if present, so a stale archive from a previous
    /// cycle can never be served. Best-effort, like workspace clearing.
    pub(crate) fn drop_archive(&self) {
        match std::fs::remove_file(self.archive_path()) {
            Ok(()) => debug!(archive = %self.archive_path().display(), "stale archive removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(
                    archive = %self.archive_path().display(),
                    error = %e,
                    "failed to remove stale archive"
                );
            }
        }
    }
}
