//! Project config file source: treesum.toml and treesum.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Base project config file name
pub const PROJECT_CONFIG_FILE: &str = "treesum.toml";

/// Add project config files to builder.
/// Precedence: treesum.toml (base) then treesum.{TREESUM_ENV}.toml when TREESUM_ENV is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = project_root.join(PROJECT_CONFIG_FILE);
    if base_config_path.is_file() {
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    if let Ok(env_name) = std::env::var("TREESUM_ENV") {
        let env_config_path = project_root.join(format!("treesum.{}.toml", env_name));
        if env_config_path.is_file() {
            builder = builder.add_source(File::from(env_config_path).required(false));
        }
    }

    Ok(builder)
}
