//! Host side of Strata: tile sampling, worker pool and PNG output around
//! the `strata-terrain` generator.

pub mod app;
pub mod error;
pub mod output;
pub mod source;
pub mod tile;
pub mod worker;

pub use app::{load_config, run};
pub use error::AppError;
pub use source::{DynGenerator, build_generator};
pub use tile::{Heightfield, cell_to_world, generate_tile};
pub use worker::TileWorkers;
