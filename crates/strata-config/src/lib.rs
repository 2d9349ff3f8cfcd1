//! Configuration for the Strata heightmap generator.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Missing fields fall back to defaults, unknown
//! fields are ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, GenerationConfig, HeightMode, OutputConfig, PerlinConfig, TileConfig,
    default_config_dir,
};
pub use error::ConfigError;
