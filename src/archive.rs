//! Archive packaging of the recovered-file tree
//!
//! Builds one zip containing every file under a directory root, with entry
//! names relative to that root (the root segment itself never appears). The
//! entry set and content are exact for a given snapshot; compression metadata
//! such as timestamps may differ between runs.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

/// Build a zip of every file under `src_root` at `archive_path`.
///
/// An existing archive at `archive_path` is overwritten. Returns the total
/// size of the written archive in bytes. An empty or missing `src_root`
/// produces a valid empty archive.
///
/// This does blocking filesystem and compression work; call it through
/// `tokio::task::spawn_blocking` from async code.
pub fn build_archive(src_root: &Path, archive_path: &Path) -> Result<u64> {
    debug!(
        src = %src_root.display(),
        archive = %archive_path.display(),
        "building archive"
    );

    let file = File::create(archive_path).map_err(|e| {
        Error::Io(io::Error::other(format!(
            "failed to create archive {}: {}",
            archive_path.display(),
            e
        )))
    })?;

    let mut writer = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut entry_count = 0usize;

    if src_root.exists() {
        for entry in WalkDir::new(src_root).min_depth(1) {
            let entry = entry.map_err(|e| {
                Error::Io(io::Error::other(format!(
                    "failed to walk {}: {}",
                    src_root.display(),
                    e
                )))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(src_root).map_err(|e| {
                Error::Io(io::Error::other(format!(
                    "entry {} escaped its root: {}",
                    entry.path().display(),
                    e
                )))
            })?;

            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            writer.start_file(name.as_str(), options).map_err(|e| {
                Error::Io(io::Error::other(format!(
                    "failed to start archive entry {}: {}",
                    name, e
                )))
            })?;

            let content = std::fs::read(entry.path()).map_err(|e| {
                Error::Io(io::Error::other(format!(
                    "failed to read {}: {}",
                    entry.path().display(),
                    e
                )))
            })?;

            writer.write_all(&content).map_err(|e| {
                Error::Io(io::Error::other(format!(
                    "failed to write archive entry {}: {}",
                    name, e
                )))
            })?;

            entry_count += 1;
        }
    }

    let file = writer.finish().map_err(|e| {
        Error::Io(io::Error::other(format!(
            "failed to finalize archive {}: {}",
            archive_path.display(),
            e
        )))
    })?;

    let total_bytes = file
        .metadata()
        .map_err(|e| {
            Error::Io(io::Error::other(format!(
                "failed to stat archive {}: {}",
                archive_path.display(),
                e
            )))
        })?
        .len();

    info!(
        archive = %archive_path.display(),
        entries = entry_count,
        total_bytes,
        "archive created"
    );

    Ok(total_bytes)
}
