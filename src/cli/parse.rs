//! CLI parse: clap types for treesum. No behavior; definitions only.

use crate::digest::CryptoAlgorithm;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// treesum - Deterministic content fingerprints for files and directories
#[derive(Parser)]
#[command(name = "treesum")]
#[command(version)]
#[command(about = "Deterministic content fingerprints and checksum manifests for filesystem trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fingerprint a path using the configured mode
    Run {
        /// File or directory to fingerprint
        path: PathBuf,
    },
    /// Compute one aggregate checksum over paths and contents
    Hash {
        /// File or directory to hash
        path: PathBuf,
        /// Hash algorithm (sha256, blake3)
        #[arg(long)]
        algorithm: Option<CryptoAlgorithm>,
    },
    /// Write a per-file digest manifest as JSON
    Manifest {
        /// File or directory to hash
        path: PathBuf,
        /// Use CRC-32 checksums instead of a cryptographic hash
        #[arg(long, conflicts_with = "algorithm")]
        checksum: bool,
        /// Hash algorithm (sha256, blake3)
        #[arg(long)]
        algorithm: Option<CryptoAlgorithm>,
        /// Manifest destination (default: <path>/checksums.json for directories,
        /// ./checksums.json for files)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print the manifest instead of writing it
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Recompute a manifest and compare it with a stored one
    Verify {
        /// File or directory to check
        path: PathBuf,
        /// Stored manifest to compare against
        #[arg(long, short)]
        manifest: PathBuf,
        /// Stored manifest holds CRC-32 checksums (inferred when omitted)
        #[arg(long, conflicts_with = "algorithm")]
        checksum: bool,
        /// Hash algorithm of the stored manifest (sha256, blake3)
        #[arg(long)]
        algorithm: Option<CryptoAlgorithm>,
    },
}
