//! CLI output: error mapping and the manifest file sink.

use crate::cli::presentation::format_manifest_json;
use crate::error::{ApiError, TraversalError};
use crate::manifest::Manifest;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Traversal(TraversalError::RootNotFound { path, .. }) => {
            format!("Error: path does not exist or is not accessible: {}", path.display())
        }
        other => format!("Error: {}", other),
    }
}

/// Where a manifest goes when no destination is given: inside `target` when it
/// is a directory, otherwise in `cwd`.
pub fn default_manifest_path(target: &Path, cwd: &Path, file_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(file_name)
    } else {
        cwd.join(file_name)
    }
}

/// Serialize `manifest` as JSON and write it to `destination`
pub fn write_manifest(manifest: &Manifest, destination: &Path) -> Result<(), ApiError> {
    let json = format_manifest_json(manifest)?;
    std::fs::write(destination, json)?;
    debug!(
        destination = %destination.display(),
        entries = manifest.len(),
        "Wrote manifest"
    );
    Ok(())
}

/// Read a manifest written by [`write_manifest`]
pub fn read_manifest(source: &Path) -> Result<Manifest, ApiError> {
    let contents = std::fs::read_to_string(source)?;
    Ok(serde_json::from_str(&contents)?)
}
