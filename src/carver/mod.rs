//! External file-carving tool invocation
//!
//! This module provides a trait-based architecture for running the external
//! recovery tool against an uploaded image. It supports a CLI implementation
//! (using the external foremost binary) and a stub implementation for
//! graceful degradation when no carver is installed.
//!
//! ## Architecture
//!
//! The core abstraction is the [`Carver`] trait: one input file in, a tree of
//! reconstructed files out. Implementations provided:
//!
//! - [`CliCarver`]: runs the external `foremost` binary
//! - [`NoOpCarver`]: stub when no carving tool is available
//!
//! ## Usage
//!
//! ```no_run
//! use carve_server::carver::{Carver, CliCarver};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let carver = CliCarver::from_path().expect("foremost binary not found");
//!     carver
//!         .carve(Path::new("intake/disk.img"), Path::new("recovered"))
//!         .await?;
//!     Ok(())
//! }
//! ```

mod cli;
mod noop;
mod traits;

pub use cli::CliCarver;
pub use noop::NoOpCarver;
pub use traits::Carver;
