//! Shared scratch workspace: the intake and recovered directories
//!
//! The workspace is the sole shared mutable resource in the pipeline. Both
//! directories are created at startup, cleared at the start of every upload
//! cycle, and never deleted while the process runs. Clearing is best-effort:
//! a partially-cleared workspace is still usable, so per-entry failures are
//! logged and skipped rather than aborting the pipeline.

use crate::config::WorkspaceConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Owns the intake and recovered scratch directories
#[derive(Clone, Debug)]
pub struct Workspace {
    intake: PathBuf,
    recovered: PathBuf,
}

impl Workspace {
    /// Create a workspace over the configured directories (no I/O)
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            intake: config.intake_dir.clone(),
            recovered: config.recovered_dir.clone(),
        }
    }

    /// The intake directory root
    pub fn intake(&self) -> &Path {
        &self.intake
    }

    /// The recovered directory root
    pub fn recovered(&self) -> &Path {
        &self.recovered
    }

    /// Create both scratch directories if absent. Idempotent.
    ///
    /// The external carver runs as a child process and must be able to write
    /// into `recovered`, so on unix both directories are opened up to mode
    /// 0o777. Failure here is fatal: the service cannot run without writable
    /// scratch space.
    pub fn ensure_all(&self) -> Result<()> {
        for dir in [&self.intake, &self.recovered] {
            std::fs::create_dir_all(dir).map_err(|e| Error::Config {
                message: format!("failed to create scratch directory {}: {}", dir.display(), e),
                key: None,
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o777)).map_err(
                    |e| Error::Config {
                        message: format!(
                            "failed to set permissions on {}: {}",
                            dir.display(),
                            e
                        ),
                        key: None,
                    },
                )?;
            }
        }
        Ok(())
    }

    /// Recursively delete every entry under `dir`, leaving `dir` itself present.
    ///
    /// Tolerates an already-empty or missing directory. Per-entry failures are
    /// logged and skipped; the caller proceeds regardless.
    pub fn clear(&self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "failed to read directory while clearing");
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "failed to read entry while clearing");
                    continue;
                }
            };

            let path = entry.path();
            let result = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };

            if let Err(e) = result {
                warn!(path = %path.display(), error = %e, "failed to remove entry while clearing");
            }
        }

        debug!(dir = %dir.display(), "workspace directory cleared");
    }

    /// Clear both the intake and recovered directories
    pub fn clear_all(&self) {
        self.clear(&self.intake);
        self.clear(&self.recovered);
    }

    /// Recursively enumerate files under `dir`, returning paths relative to
    /// `dir` with components joined by `/` regardless of platform.
    ///
    /// The listing is sorted so repeated calls over the same snapshot agree.
    /// A missing directory lists as empty.
    pub fn list(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(|e| {
                Error::Io(std::io::Error::other(format!(
                    "failed to walk {}: {}",
                    dir.display(),
                    e
                )))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(dir).map_err(|e| {
                Error::Io(std::io::Error::other(format!(
                    "entry {} escaped its root: {}",
                    entry.path().display(),
                    e
                )))
            })?;

            files.push(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"),
            );
        }

        files.sort();
        Ok(files)
    }

    /// List the intake directory
    pub fn list_intake(&self) -> Result<Vec<String>> {
        self.list(&self.intake)
    }

    /// List the recovered directory
    pub fn list_recovered(&self) -> Result<Vec<String>> {
        self.list(&self.recovered)
    }

    /// The first file in the current intake enumeration, if any.
    ///
    /// The upload path keeps at most one file in intake, so this is the sole
    /// active item; with multiple files present the selection is the first in
    /// sorted order.
    pub fn first_intake_file(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .list_intake()?
            .into_iter()
            .next()
            .map(|relative| self.intake.join(relative)))
    }
}
