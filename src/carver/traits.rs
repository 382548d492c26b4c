//! Trait for external file-carving tools

use async_trait::async_trait;
use std::path::Path;

/// Trait for file-carving tools
///
/// Defines the file-in, files-out contract of the recovery step: the
/// implementation reads `input` and writes every file it can reconstruct
/// under `output_dir`. Success is a unit value; the caller discovers the
/// actual output by enumerating `output_dir` afterward.
///
/// Implementations can shell out to external binaries or provide stub
/// functionality for graceful degradation.
#[async_trait]
pub trait Carver: Send + Sync {
    /// Run the carving tool against `input`, writing results under `output_dir`.
    ///
    /// Waits for the tool to finish. This can run for a long time on large
    /// images; callers must not hold up unrelated work while awaiting it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tool exits non-zero ([`crate::CarverError::Failed`], carrying the
    ///   captured stderr text)
    /// - The tool cannot be launched ([`crate::CarverError::Spawn`])
    /// - The operation is not supported (stub implementations)
    async fn carve(&self, input: &Path, output_dir: &Path) -> crate::Result<()>;

    /// Short identifier for logging and diagnostics
    fn name(&self) -> &'static str;
}
