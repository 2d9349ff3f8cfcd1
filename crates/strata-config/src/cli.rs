//! Command-line argument parsing for the heightmap generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::HeightMode;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Seeded heightmap tile generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Height source.
    #[arg(long, value_enum)]
    pub mode: Option<HeightMode>,

    /// Samples per tile side, applied to every tile.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Output directory for PNG tiles.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Worker threads (0 = one per core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write flat zero-height tiles instead of sampling terrain.
    #[arg(long)]
    pub reset: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(mode) = args.mode {
            self.generation.mode = mode;
        }
        if let Some(resolution) = args.resolution {
            for tile in &mut self.tiles {
                tile.resolution = resolution;
            }
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(threads) = args.threads {
            self.output.threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
