//! One generation run: validate, seed, sample every tile, write PNGs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use strata_config::{CliArgs, Config};

use crate::error::AppError;
use crate::output::write_tile;
use crate::source::build_generator;
use crate::tile::Heightfield;
use crate::worker::TileWorkers;

/// Load `config.ron` from `config_dir`, creating it with defaults if missing,
/// and apply CLI overrides.
///
/// A file that exists but cannot be read or parsed is an error; it is never
/// replaced by defaults.
pub fn load_config(config_dir: &Path, args: &CliArgs) -> Result<Config, AppError> {
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    Ok(config)
}

/// Generate every configured tile and return the written paths.
///
/// With `reset` set, tiles are written flat without building a generator.
pub fn run(config: &Config, reset: bool) -> Result<Vec<PathBuf>, AppError> {
    config.validate()?;

    let directory = &config.output.directory;
    std::fs::create_dir_all(directory).map_err(|source| AppError::Io {
        path: directory.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(config.tiles.len());

    if reset {
        for tile in &config.tiles {
            let field = Heightfield::flat(tile.resolution as usize);
            let path = write_tile(directory, &tile.name, &field, config.output.max_height)?;
            tracing::info!(tile = %tile.name, path = %path.display(), "tile reset");
            written.push(path);
        }
        return Ok(written);
    }

    let generator = build_generator(config)?;
    let workers = TileWorkers::new(config.output.threads);
    tracing::info!(
        tiles = config.tiles.len(),
        threads = workers.threads(),
        "generating heightmaps"
    );

    for tile in &config.tiles {
        let start = Instant::now();
        let field = workers.generate(&generator, tile)?;
        let (min, max) = field.height_range();
        if max > config.output.max_height {
            tracing::warn!(
                tile = %tile.name,
                max,
                max_height = config.output.max_height,
                "heights above max_height are clamped"
            );
        }
        let path = write_tile(directory, &tile.name, &field, config.output.max_height)?;
        tracing::info!(
            tile = %tile.name,
            resolution = tile.resolution,
            min,
            max,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "tile written"
        );
        written.push(path);
    }

    Ok(written)
}
