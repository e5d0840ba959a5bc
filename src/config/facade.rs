//! Config loading facade: assembles sources in merge order.

use super::merge::merge_policy;
use super::sources::{environment, global_file, project_file};
use super::TreesumConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`TreesumConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, project files under `project_root`, environment.
    pub fn load(project_root: &Path) -> Result<TreesumConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = project_file::add_to_builder(builder, project_root)?;
        let builder = environment::add_to_builder(builder);

        let config: TreesumConfig = builder.build()?.try_deserialize()?;
        debug!(project_root = %project_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Defaults, one explicit file, environment. Fails if the file is missing.
    pub fn load_from_file(path: &Path) -> Result<TreesumConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: TreesumConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
