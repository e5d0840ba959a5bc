//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;
use std::path::Path;

/// Command name string for log fields (e.g. "manifest", "verify").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Run { .. } => "run",
        Commands::Hash { .. } => "hash",
        Commands::Manifest { .. } => "manifest",
        Commands::Verify { .. } => "verify",
    }
}

/// Target path of a command
pub fn command_target(command: &Commands) -> &Path {
    match command {
        Commands::Run { path }
        | Commands::Hash { path, .. }
        | Commands::Manifest { path, .. }
        | Commands::Verify { path, .. } => path,
    }
}
