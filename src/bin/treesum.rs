//! Treesum CLI Binary
//!
//! Command-line interface for computing and verifying tree fingerprints.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use treesum::cli::{Cli, RunContext};
use treesum::config::TreesumConfig;
use treesum::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {}", e);
            process::exit(1);
        }
    };

    let config = match RunContext::load_config(&cwd, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", treesum::cli::map_error(&e));
            process::exit(1);
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Treesum CLI starting");

    let context = match RunContext::from_config(config, cwd) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", treesum::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", treesum::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Logging stays off unless --verbose or --log-level is given.
fn build_logging_config(cli: &Cli, config: &TreesumConfig) -> LoggingConfig {
    if !cli.verbose && cli.log_level.is_none() {
        return LoggingConfig::disabled();
    }

    let mut logging = config.logging.clone();

    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
        if cli.log_output.is_none() {
            logging.output = "file".to_string();
        }
    }
    if logging.output == "file" && logging.file.is_none() {
        logging.file = Some(PathBuf::from("treesum.log"));
    }

    logging
}
