//! Fingerprint builder: one traversal feeding one accumulator

use crate::digest::{Algorithm, CryptoAlgorithm, Digest};
use crate::error::TraversalError;
use crate::manifest::Manifest;
use crate::tree::exclude::Exclusions;
use crate::tree::fs::{EntryKind, FileSystem, LocalFs};
use crate::tree::hasher::{AggregateAccumulator, DigestAccumulator, ManifestAccumulator};
use crate::tree::walker::Walker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Which kind of result to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One digest over paths and contents
    #[default]
    Aggregate,
    /// Per-file cryptographic digests
    Manifest,
    /// Per-file CRC-32 checksums
    Checksum,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aggregate" => Ok(Mode::Aggregate),
            "manifest" => Ok(Mode::Manifest),
            "checksum" => Ok(Mode::Checksum),
            other => Err(format!(
                "Unknown mode: {} (must be 'aggregate', 'manifest' or 'checksum')",
                other
            )),
        }
    }
}

/// Accumulation policy selected per invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashStrategy {
    Aggregate(CryptoAlgorithm),
    ManifestCrypto(CryptoAlgorithm),
    ManifestChecksum,
}

impl HashStrategy {
    pub fn from_mode(mode: Mode, algorithm: CryptoAlgorithm) -> Self {
        match mode {
            Mode::Aggregate => HashStrategy::Aggregate(algorithm),
            Mode::Manifest => HashStrategy::ManifestCrypto(algorithm),
            Mode::Checksum => HashStrategy::ManifestChecksum,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            HashStrategy::Aggregate(algorithm) | HashStrategy::ManifestCrypto(algorithm) => {
                Algorithm::Crypto(*algorithm)
            }
            HashStrategy::ManifestChecksum => Algorithm::Crc32,
        }
    }

    pub fn is_manifest(&self) -> bool {
        !matches!(self, HashStrategy::Aggregate(_))
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashStrategy::Aggregate(algorithm) => write!(f, "aggregate-{}", algorithm),
            HashStrategy::ManifestCrypto(algorithm) => write!(f, "manifest-{}", algorithm),
            HashStrategy::ManifestChecksum => f.write_str("manifest-crc32"),
        }
    }
}

/// Result of a fingerprint run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fingerprint {
    Aggregate(Digest),
    Manifest(Manifest),
}

impl Fingerprint {
    pub fn as_digest(&self) -> Option<&Digest> {
        match self {
            Fingerprint::Aggregate(digest) => Some(digest),
            Fingerprint::Manifest(_) => None,
        }
    }

    pub fn as_manifest(&self) -> Option<&Manifest> {
        match self {
            Fingerprint::Manifest(manifest) => Some(manifest),
            Fingerprint::Aggregate(_) => None,
        }
    }

    pub fn into_manifest(self) -> Option<Manifest> {
        match self {
            Fingerprint::Manifest(manifest) => Some(manifest),
            Fingerprint::Aggregate(_) => None,
        }
    }
}

/// Runs a walker and feeds each node to an accumulator
pub struct Fingerprinter<F = LocalFs> {
    walker: Walker<F>,
}

impl Fingerprinter<LocalFs> {
    /// Fingerprint a tree on the local filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            walker: Walker::new(root),
        }
    }
}

impl<F: FileSystem> Fingerprinter<F> {
    pub fn from_walker(walker: Walker<F>) -> Self {
        Self { walker }
    }

    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.walker = self.walker.with_exclusions(exclusions);
        self
    }

    pub fn walker(&self) -> &Walker<F> {
        &self.walker
    }

    /// Walk once, reading each accepted file in full and handing it to `acc`
    #[instrument(skip(self, acc), fields(root = %self.walker.root().display()))]
    pub fn run<A: DigestAccumulator>(&self, mut acc: A) -> Result<A::Output, TraversalError> {
        let start = Instant::now();
        let mut directories = 0usize;
        let mut files = 0usize;
        let mut bytes = 0u64;

        for node in self.walker.iter() {
            let node = node.map_err(|e| {
                error!("Traversal failed: {}", e);
                e
            })?;

            match node.kind {
                EntryKind::Directory => {
                    directories += 1;
                    acc.visit_directory(&node);
                }
                EntryKind::RegularFile => {
                    let content = self
                        .walker
                        .fs()
                        .read_all(&node.absolute_path)
                        .map_err(|source| {
                            error!(path = %node.absolute_path.display(), "Failed to read file: {}", source);
                            TraversalError::Read {
                                path: node.absolute_path.clone(),
                                source,
                            }
                        })?;
                    debug!(path = %node.relative_path, size = content.len(), "Hashing file");
                    files += 1;
                    bytes += content.len() as u64;
                    acc.visit_file(&node, &content);
                }
                EntryKind::Other => {}
            }
        }

        info!(
            directories,
            files,
            bytes,
            duration_ms = start.elapsed().as_millis(),
            "Traversal completed"
        );
        Ok(acc.finish())
    }

    /// Single digest over the whole subtree
    pub fn aggregate_digest(&self, algorithm: CryptoAlgorithm) -> Result<Digest, TraversalError> {
        self.run(AggregateAccumulator::new(algorithm.into()))
    }

    /// Per-file digest manifest
    pub fn build_manifest(&self, algorithm: Algorithm) -> Result<Manifest, TraversalError> {
        self.run(ManifestAccumulator::new(algorithm))
    }

    pub fn fingerprint(&self, strategy: HashStrategy) -> Result<Fingerprint, TraversalError> {
        info!(strategy = %strategy, "Computing fingerprint");
        match strategy {
            HashStrategy::Aggregate(algorithm) => {
                self.aggregate_digest(algorithm).map(Fingerprint::Aggregate)
            }
            HashStrategy::ManifestCrypto(_) | HashStrategy::ManifestChecksum => self
                .build_manifest(strategy.algorithm())
                .map(Fingerprint::Manifest),
        }
    }
}
