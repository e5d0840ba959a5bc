//! CLI route: single route table and run context.

use crate::cli::help::{command_name, command_target};
use crate::cli::output::{default_manifest_path, read_manifest, write_manifest};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_checksum, format_manifest_json, format_manifest_written, format_verify_success,
};
use crate::config::{ConfigLoader, TreesumConfig};
use crate::digest::{Algorithm, CryptoAlgorithm, Digest};
use crate::error::ApiError;
use crate::manifest::Manifest;
use crate::tree::{path, Fingerprint, Fingerprinter, Mode};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, info_span, warn};

/// Runtime context for CLI execution: working directory and merged config.
pub struct RunContext {
    config: TreesumConfig,
    cwd: PathBuf,
}

impl RunContext {
    /// Load config (explicit file, or layered discovery under `cwd`) and validate it.
    pub fn new(cwd: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(&cwd, config_path.as_deref())?;
        Self::from_config(config, cwd)
    }

    /// Load configuration without building a context
    pub fn load_config(cwd: &Path, config_path: Option<&Path>) -> Result<TreesumConfig, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(cwd)?,
        };
        Ok(config)
    }

    /// Build from an already-loaded config
    pub fn from_config(config: TreesumConfig, cwd: PathBuf) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(Self { config, cwd })
    }

    pub fn config(&self) -> &TreesumConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let span = info_span!(
            "command",
            name = command_name(command),
            target = %command_target(command).display()
        );
        let _enter = span.enter();
        let started = Instant::now();

        let result = self.execute_inner(command);
        match &result {
            Ok(_) => info!(
                duration_ms = started.elapsed().as_millis(),
                "Command completed"
            ),
            Err(e) => warn!("Command failed: {}", e),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Run { path } => {
                let target = self.resolve(path);
                let strategy = self.config.hashing.strategy();
                match self.fingerprinter(&target).fingerprint(strategy)? {
                    Fingerprint::Aggregate(digest) => Ok(format_checksum(&digest)),
                    Fingerprint::Manifest(manifest) => {
                        self.emit_manifest(&target, &manifest, strategy.algorithm(), None, false)
                    }
                }
            }
            Commands::Hash { path, algorithm } => {
                let target = self.resolve(path);
                let algorithm = algorithm.unwrap_or(self.config.hashing.algorithm);
                let digest = self.fingerprinter(&target).aggregate_digest(algorithm)?;
                Ok(format_checksum(&digest))
            }
            Commands::Manifest {
                path,
                checksum,
                algorithm,
                output,
                stdout,
            } => {
                let target = self.resolve(path);
                let algorithm = self.manifest_algorithm(*checksum, *algorithm);
                let manifest = self.fingerprinter(&target).build_manifest(algorithm)?;
                self.emit_manifest(&target, &manifest, algorithm, output.as_deref(), *stdout)
            }
            Commands::Verify {
                path,
                manifest,
                checksum,
                algorithm,
            } => self.verify(path, manifest, *checksum, *algorithm),
        }
    }

    fn verify(
        &self,
        path: &Path,
        manifest_path: &Path,
        checksum: bool,
        algorithm: Option<CryptoAlgorithm>,
    ) -> Result<String, ApiError> {
        let target = self.resolve(path);
        let manifest_path = self.resolve(manifest_path);
        let mut expected = read_manifest(&manifest_path)?;

        let algorithm = if checksum || algorithm.is_some() {
            self.manifest_algorithm(checksum, algorithm)
        } else {
            infer_algorithm(&expected, self.config.hashing.algorithm)
                .unwrap_or_else(|| self.manifest_algorithm(false, None))
        };

        validate_digests(&expected, algorithm)?;

        let mut actual = self.fingerprinter(&target).build_manifest(algorithm)?;

        // A manifest stored inside the tree can never hold its own digest
        if let (Ok(root), Ok(file)) = (target.canonicalize(), manifest_path.canonicalize()) {
            if let Some(relative) = path::relative_within(&root, &file).filter(|r| !r.is_empty()) {
                expected.remove(&relative);
                actual.remove(&relative);
            }
        }

        let diff = expected.diff(&actual);
        if diff.is_empty() {
            Ok(format_verify_success(&expected))
        } else {
            Err(ApiError::ManifestMismatch(diff.to_string()))
        }
    }

    fn emit_manifest(
        &self,
        target: &Path,
        manifest: &Manifest,
        algorithm: Algorithm,
        output: Option<&Path>,
        stdout: bool,
    ) -> Result<String, ApiError> {
        if stdout {
            return format_manifest_json(manifest);
        }
        let destination = match output {
            Some(output) => self.resolve(output),
            None => default_manifest_path(target, &self.cwd, &self.config.output.manifest_file),
        };
        write_manifest(manifest, &destination)?;
        Ok(format_manifest_written(algorithm, &destination))
    }

    /// Flags win, then the configured mode
    fn manifest_algorithm(&self, checksum: bool, algorithm: Option<CryptoAlgorithm>) -> Algorithm {
        if checksum {
            return Algorithm::Crc32;
        }
        match algorithm {
            Some(algorithm) => Algorithm::Crypto(algorithm),
            None if self.config.hashing.mode == Mode::Checksum => Algorithm::Crc32,
            None => Algorithm::Crypto(self.config.hashing.algorithm),
        }
    }

    fn fingerprinter(&self, target: &Path) -> Fingerprinter {
        Fingerprinter::new(target).with_exclusions(self.config.hashing.exclusions())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Reject stored digests that `algorithm` could not have produced
fn validate_digests(manifest: &Manifest, algorithm: Algorithm) -> Result<(), ApiError> {
    for (path, digest) in manifest {
        let valid = Digest::from_hex(digest)
            .map(|parsed| parsed.as_bytes().len() * 2 == algorithm.hex_len())
            .unwrap_or(false);
        if !valid {
            return Err(ApiError::InvalidManifest(format!(
                "entry {:?} has digest {:?}, expected {} hex characters",
                path,
                digest,
                algorithm.hex_len()
            )));
        }
    }
    Ok(())
}

/// Guess the algorithm of a stored manifest from its digest lengths
fn infer_algorithm(manifest: &Manifest, crypto: CryptoAlgorithm) -> Option<Algorithm> {
    let mut lengths = manifest.iter().map(|(_, digest)| digest.len());
    let first = lengths.next()?;
    if !lengths.all(|len| len == first) {
        return None;
    }
    [Algorithm::Crc32, Algorithm::Crypto(crypto)]
        .into_iter()
        .find(|algorithm| algorithm.hex_len() == first)
}
