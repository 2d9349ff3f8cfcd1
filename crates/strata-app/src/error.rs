//! Host error types.

use std::path::PathBuf;

use strata_config::ConfigError;
use strata_terrain::TerrainError;

/// Everything that can stop a generation run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid terrain setup: {0}")]
    Terrain(#[from] TerrainError),

    /// Creating the output directory or a tile file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode heightmap: {0}")]
    Png(#[from] png::EncodingError),

    #[error("failed to spawn tile worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The row queue refused a row, because it was full or no worker was left.
    #[error("row queue for tile '{tile}' rejected row {row}")]
    RowQueueRejected { tile: String, row: usize },
}
