//! Environment source: TREESUM_<SECTION>__<KEY>, e.g. TREESUM_HASHING__MODE=checksum

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add the environment variable source to builder.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("TREESUM")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("hashing.exclude_extensions")
            .try_parsing(true),
    )
}
