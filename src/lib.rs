//! Treesum: Deterministic Filesystem Fingerprints
//!
//! Computes a content-based fingerprint of a file or directory tree, either as
//! one aggregate digest over paths and contents or as a manifest of per-file
//! digests. Results depend only on relative paths and bytes, never on
//! timestamps, permissions or the order the OS lists directory entries in.

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod tree;

pub use digest::{Algorithm, CryptoAlgorithm, Digest};
pub use error::{ApiError, TraversalError};
pub use manifest::Manifest;
pub use tree::{Fingerprint, Fingerprinter, HashStrategy, Mode};

use std::path::Path;

/// Aggregate digest of the tree at `root` on the local filesystem
pub fn aggregate_digest(root: &Path, algorithm: CryptoAlgorithm) -> Result<Digest, TraversalError> {
    Fingerprinter::new(root).aggregate_digest(algorithm)
}

/// Per-file manifest of the tree at `root` on the local filesystem
pub fn build_manifest(root: &Path, algorithm: Algorithm) -> Result<Manifest, TraversalError> {
    Fingerprinter::new(root).build_manifest(algorithm)
}

/// Fingerprint the tree at `root` with the given strategy
pub fn fingerprint(root: &Path, strategy: HashStrategy) -> Result<Fingerprint, TraversalError> {
    Fingerprinter::new(root).fingerprint(strategy)
}
