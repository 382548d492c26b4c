//! CLI-based carver using the external foremost binary

use super::traits::Carver;
use crate::error::CarverError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// CLI-based carver using the external foremost binary
///
/// Invokes `foremost -i <input> -o <output_dir>` and waits for it to exit.
/// Reconstructed files land under `output_dir` grouped by type (foremost
/// creates `jpg/`, `png/`, ... subdirectories plus an `audit.txt`).
///
/// # Examples
///
/// ```no_run
/// use carve_server::carver::{Carver, CliCarver};
/// use std::path::{Path, PathBuf};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Create with explicit path
/// let carver = CliCarver::new(PathBuf::from("/usr/bin/foremost"));
///
/// // Or auto-discover from PATH
/// let carver = CliCarver::from_path()
///     .expect("foremost not found in PATH");
///
/// carver.carve(Path::new("disk.img"), Path::new("recovered")).await?;
/// # Ok(())
/// # }
/// ```
pub struct CliCarver {
    binary_path: PathBuf,
    extra_args: Vec<String>,
}

impl CliCarver {
    /// Create a new CLI carver with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            extra_args: Vec::new(),
        }
    }

    /// Attempt to find foremost in PATH
    ///
    /// Uses the `which` crate to search the system PATH.
    ///
    /// # Returns
    ///
    /// `Some(CliCarver)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("foremost").ok().map(Self::new)
    }

    /// Append extra arguments to every invocation
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

#[async_trait]
impl Carver for CliCarver {
    async fn carve(&self, input: &Path, output_dir: &Path) -> crate::Result<()> {
        debug!(
            binary = %self.binary_path.display(),
            input = %input.display(),
            output = %output_dir.display(),
            "invoking carver"
        );

        let output = Command::new(&self.binary_path)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output_dir)
            .args(&self.extra_args)
            .output()
            .await
            .map_err(|e| CarverError::Spawn {
                tool: self.binary_path.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CarverError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        // foremost writes its summary to stdout; keep it visible for operators
        if !output.stdout.is_empty() {
            debug!(stdout = %String::from_utf8_lossy(&output.stdout), "carver output");
        }
        info!(input = %input.display(), "carver finished");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "cli-foremost"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_path_returns_none_for_nonexistent_binary() {
        // This passes as long as there's no binary with this name in PATH
        let result = which::which("nonexistent-foremost-binary-xyz");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_binary_discovery() {
        // from_path() must agree with which() regardless of whether foremost
        // is actually installed on the machine running the tests
        let which_result = which::which("foremost");
        let from_path_result = CliCarver::from_path();

        match which_result {
            Ok(expected_path) => {
                let carver = from_path_result.expect("from_path should find foremost");
                assert_eq!(carver.binary_path, expected_path);
            }
            Err(_) => {
                assert!(from_path_result.is_none());
            }
        }
    }

    #[tokio::test]
    async fn test_carve_spawn_failure() {
        let carver = CliCarver::new(PathBuf::from("/nonexistent/foremost-xyz"));
        let result = carver
            .carve(Path::new("input.img"), Path::new("/tmp/out"))
            .await;

        match result {
            Err(Error::Carver(CarverError::Spawn { tool, .. })) => {
                assert!(tool.contains("foremost-xyz"));
            }
            other => panic!("expected spawn failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    mod script_carver {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::tempdir;

        /// Write an executable shell script posing as the carver binary.
        fn fake_carver(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-foremost");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_carve_success_writes_output_tree() {
            let dir = tempdir().unwrap();
            let input = dir.path().join("disk.img");
            std::fs::write(&input, b"image-bytes").unwrap();
            let out = dir.path().join("recovered");

            // args arrive as: -i <input> -o <output>
            let script = fake_carver(dir.path(), "mkdir -p \"$4\"/jpg && cp \"$2\" \"$4\"/jpg/00000001.jpg");
            let carver = CliCarver::new(script);

            carver.carve(&input, &out).await.unwrap();

            assert!(out.join("jpg/00000001.jpg").is_file());
        }

        #[tokio::test]
        async fn test_carve_nonzero_exit_captures_stderr() {
            let dir = tempdir().unwrap();
            let input = dir.path().join("disk.img");
            std::fs::write(&input, b"image-bytes").unwrap();

            let script = fake_carver(dir.path(), "echo 'could not open image' >&2; exit 2");
            let carver = CliCarver::new(script);

            let result = carver.carve(&input, &dir.path().join("recovered")).await;

            match result {
                Err(Error::Carver(CarverError::Failed { code, stderr })) => {
                    assert_eq!(code, Some(2));
                    assert!(stderr.contains("could not open image"));
                }
                other => panic!("expected carver failure, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_extra_args_are_passed_through() {
            let dir = tempdir().unwrap();
            let input = dir.path().join("disk.img");
            std::fs::write(&input, b"image-bytes").unwrap();

            // fails unless the fifth argument is present
            let script = fake_carver(dir.path(), "test \"$5\" = '-Q' || exit 3");
            let carver = CliCarver::new(script).with_extra_args(vec!["-Q".to_string()]);

            carver
                .carve(&input, &dir.path().join("recovered"))
                .await
                .unwrap();
        }
    }
}
