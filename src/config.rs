//! Configuration System
//!
//! Layered configuration for hashing mode, algorithm, extra exclusions, output
//! naming and logging. Sources merge in order: built-in defaults, the global
//! file, the project file, then `TREESUM_*` environment variables.

use crate::digest::CryptoAlgorithm;
use crate::logging::LoggingConfig;
use crate::tree::{Exclusions, HashStrategy, Mode};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::project_file::PROJECT_CONFIG_FILE;

/// Default manifest file name, written next to the hashed directory
pub const DEFAULT_MANIFEST_FILE: &str = "checksums.json";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreesumConfig {
    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hashing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashingConfig {
    /// aggregate, manifest or checksum
    #[serde(default)]
    pub mode: Mode,

    /// Cryptographic algorithm for aggregate and manifest modes
    #[serde(default)]
    pub algorithm: CryptoAlgorithm,

    /// Extensions excluded on top of the built-in `._*` and `.pyc` rules
    #[serde(default)]
    pub exclude_extensions: Vec<String>,
}

impl HashingConfig {
    pub fn strategy(&self) -> HashStrategy {
        HashStrategy::from_mode(self.mode, self.algorithm)
    }

    pub fn exclusions(&self) -> Exclusions {
        Exclusions::with_extensions(&self.exclude_extensions)
    }

    /// Validate hashing configuration
    pub fn validate(&self) -> Result<(), String> {
        for ext in &self.exclude_extensions {
            let trimmed = ext.trim_start_matches('.');
            if trimmed.is_empty() {
                return Err(format!("Excluded extension '{}' is empty", ext));
            }
            if trimmed.contains('/') || trimmed.contains('\\') {
                return Err(format!(
                    "Excluded extension '{}' must not contain a path separator",
                    ext
                ));
            }
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Manifest file name used when no explicit output path is given
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
}

fn default_manifest_file() -> String {
    DEFAULT_MANIFEST_FILE.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            manifest_file: default_manifest_file(),
        }
    }
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.manifest_file.trim().is_empty() {
            return Err("Manifest file name cannot be empty".to_string());
        }
        if self.manifest_file.contains('/') || self.manifest_file.contains('\\') {
            return Err(format!(
                "Manifest file name '{}' must be a bare file name",
                self.manifest_file
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Hashing(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Hashing(msg) => write!(f, "Hashing: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TreesumConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.hashing.validate() {
            errors.push(ValidationError::Hashing(e));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
