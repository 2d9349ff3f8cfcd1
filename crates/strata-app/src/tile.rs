//! Heightmap tiles: square grids of height samples placed in world space.

use strata_config::TileConfig;
use strata_terrain::{HeightSource, TerrainGenerator};

/// Row-major `resolution × resolution` grid of heights.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    resolution: usize,
    heights: Vec<f32>,
}

impl Heightfield {
    /// A grid with every height at zero.
    pub fn flat(resolution: usize) -> Self {
        Self {
            resolution,
            heights: vec![0.0; resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Height at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.heights[y * self.resolution + x]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.resolution;
        &mut self.heights[start..start + self.resolution]
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// `(min, max)` over all samples, ignoring NaN.
    pub fn height_range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

/// World coordinate of grid cell `(x, y)`.
///
/// The first and last columns land exactly on the tile's edges, so tiles
/// placed edge to edge sample identical coordinates along the seam.
pub fn cell_to_world(tile: &TileConfig, x: usize, y: usize) -> (f32, f32) {
    let last = (tile.resolution.max(2) - 1) as f32;
    (
        tile.origin_x + x as f32 / last * tile.size_x,
        tile.origin_z + y as f32 / last * tile.size_z,
    )
}

/// Heights for one row of a tile.
pub fn sample_row<S: HeightSource>(
    generator: &TerrainGenerator<S>,
    tile: &TileConfig,
    y: usize,
) -> Vec<f32> {
    (0..tile.resolution as usize)
        .map(|x| {
            let (world_x, world_z) = cell_to_world(tile, x, y);
            generator.sample_height(world_x, world_z)
        })
        .collect()
}

/// Sample a whole tile on the calling thread.
pub fn generate_tile<S: HeightSource>(generator: &TerrainGenerator<S>, tile: &TileConfig) -> Heightfield {
    let mut field = Heightfield::flat(tile.resolution as usize);
    for y in 0..field.resolution() {
        let row = sample_row(generator, tile, y);
        field.row_mut(y).copy_from_slice(&row);
    }
    field
}
