//! Error types for tree fingerprinting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking and hashing a tree.
///
/// All of these abort the invocation. There is no partial result.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("Root path not found or inaccessible: {path:?}: {source}")]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path:?}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Entry name is not valid UTF-8 and has no exact relative path
    #[error("Entry name is not valid UTF-8: {path:?}")]
    InvalidName { path: PathBuf },
}

impl TraversalError {
    /// Path of the entry that caused the failure
    pub fn path(&self) -> &std::path::Path {
        match self {
            TraversalError::RootNotFound { path, .. }
            | TraversalError::List { path, .. }
            | TraversalError::Read { path, .. }
            | TraversalError::InvalidName { path } => path,
        }
    }
}

/// Errors surfaced by the CLI and configuration layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Traversal(#[from] TraversalError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Manifest mismatch:\n{0}")]
    ManifestMismatch(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
