//! No-op carver for graceful degradation

use super::traits::Carver;
use async_trait::async_trait;
use std::path::Path;

/// No-op carver used when no carving tool is available
///
/// Used when no external foremost binary is available or configured. Instead
/// of failing at startup, the service comes up and surfaces a clean
/// `Error::NotSupported` when a recovery run is actually triggered.
///
/// # Examples
///
/// ```
/// use carve_server::carver::{Carver, NoOpCarver};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let carver = NoOpCarver;
/// let result = carver.carve(Path::new("disk.img"), Path::new("recovered")).await;
/// assert!(result.is_err());
/// # Ok(())
/// # }
/// ```
pub struct NoOpCarver;

#[async_trait]
impl Carver for NoOpCarver {
    async fn carve(&self, _input: &Path, _output_dir: &Path) -> crate::Result<()> {
        Err(crate::Error::NotSupported(
            "file carving requires the external foremost binary. \
             Configure foremost_path in config or ensure foremost is in PATH."
                .into(),
        ))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
