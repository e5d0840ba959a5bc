//! CLI domain: parse, route, help, output, and presentation only.
//! No hashing logic; the route table dispatches to the fingerprint builder.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, command_target};
pub use output::{default_manifest_path, map_error, read_manifest, write_manifest};
pub use parse::{Cli, Commands};
pub use presentation::{
    algorithm_label, format_checksum, format_manifest_json, format_manifest_written,
    format_verify_success,
};
pub use route::RunContext;
