//! Strata heightmap generator.
//!
//! Loads `config.ron`, applies CLI overrides, and writes one 16-bit PNG per
//! configured tile. Run with `cargo run -p strata-app -- --seed 42` to pick
//! a seed, or `-- --reset` to write flat tiles.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strata_config::{CliArgs, default_config_dir};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // A config that exists but does not load is fatal; defaults would
    // silently overwrite every tile.
    let config = match strata_app::load_config(&config_dir, &args) {
        Ok(config) => config,
        Err(e) => {
            strata_log::init_logging(None, false, None);
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match strata_app::run(&config, args.reset) {
        Ok(paths) => {
            tracing::info!(count = paths.len(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
