//! Shared test helpers for creating RecoveryService instances in tests.

use crate::carver::Carver;
use crate::config::Config;
use crate::error::CarverError;
use crate::service::RecoveryService;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// Config rooted inside a temp directory.
pub(crate) fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.workspace.intake_dir = root.join("intake");
    config.workspace.recovered_dir = root.join("recovered");
    config.workspace.archive_path = root.join("recovered_files.zip");
    config
}

/// Scripted carver: writes a fixed set of relative files into the output
/// directory, or fails with the given stderr text. Counts invocations so
/// tests can assert the external process was (not) invoked.
pub(crate) struct StubCarver {
    outputs: Vec<(String, Vec<u8>)>,
    fail_stderr: Option<String>,
    calls: AtomicUsize,
}

impl StubCarver {
    /// Carver that reconstructs the given relative files.
    pub(crate) fn with_outputs(outputs: &[(&str, &[u8])]) -> Self {
        Self {
            outputs: outputs
                .iter()
                .map(|(name, content)| (name.to_string(), content.to_vec()))
                .collect(),
            fail_stderr: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Carver that always exits non-zero with the given stderr text.
    pub(crate) fn failing(stderr: &str) -> Self {
        Self {
            outputs: Vec::new(),
            fail_stderr: Some(stderr.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Carver for StubCarver {
    async fn carve(&self, _input: &Path, output_dir: &Path) -> crate::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(stderr) = &self.fail_stderr {
            return Err(CarverError::Failed {
                code: Some(1),
                stderr: stderr.clone(),
            }
            .into());
        }

        for (name, content) in &self.outputs {
            let dest = output_dir.join(name);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(dest, content)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Service over a stub carver reconstructing the usual two-image tree.
/// Returns the service, the stub (for call assertions) and the tempdir
/// (which must be kept alive).
pub(crate) fn create_test_service() -> (RecoveryService, Arc<StubCarver>, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let carver = Arc::new(StubCarver::with_outputs(&[
        ("jpg/00000001.jpg", b"jpeg-bytes" as &[u8]),
        ("png/00000002.png", b"png-bytes"),
    ]));
    let service =
        RecoveryService::with_carver(test_config(temp_dir.path()), carver.clone()).unwrap();
    (service, carver, temp_dir)
}

/// Service whose carver fails with the given stderr text.
pub(crate) fn create_failing_service(stderr: &str) -> (RecoveryService, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let carver = Arc::new(StubCarver::failing(stderr));
    let service = RecoveryService::with_carver(test_config(temp_dir.path()), carver).unwrap();
    (service, temp_dir)
}
