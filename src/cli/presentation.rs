//! CLI presentation: text and JSON formatters per command.

use crate::digest::{Algorithm, CryptoAlgorithm, Digest};
use crate::error::ApiError;
use crate::manifest::Manifest;
use std::path::Path;

/// Aggregate result line
pub fn format_checksum(digest: &Digest) -> String {
    format!("Checksum: {}", digest)
}

/// Manifest as 2-space indented JSON, entries in traversal order
pub fn format_manifest_json(manifest: &Manifest) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

/// Short uppercase label for an algorithm
pub fn algorithm_label(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Crypto(CryptoAlgorithm::Sha256) => "SHA256",
        Algorithm::Crypto(CryptoAlgorithm::Blake3) => "BLAKE3",
        Algorithm::Crc32 => "CRC32",
    }
}

/// Confirmation after writing a manifest
pub fn format_manifest_written(algorithm: Algorithm, destination: &Path) -> String {
    format!(
        "{} manifest written to {}",
        algorithm_label(algorithm),
        destination.display()
    )
}

/// Confirmation after a successful verify
pub fn format_verify_success(manifest: &Manifest) -> String {
    format!("OK: {} entries verified", manifest.len())
}
