//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win: defaults, then the global file, then the project file,
//! then `TREESUM_*` environment variables.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("hashing.mode", "aggregate")?
        .set_default("hashing.algorithm", "sha256")?
        .set_default("output.manifest_file", crate::config::DEFAULT_MANIFEST_FILE)
}
