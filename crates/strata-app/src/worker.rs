//! Row-parallel tile generation over a scoped worker pool.
//!
//! Rows are queued on a crossbeam channel and pulled by named worker
//! threads; finished rows come back on a second channel and are stitched
//! into the field by the calling thread. Sampling is pure, so the result is
//! identical to [`generate_tile`](crate::tile::generate_tile).

use crossbeam_channel::{Sender, bounded, unbounded};
use strata_config::TileConfig;
use strata_terrain::{HeightSource, TerrainGenerator};

use crate::error::AppError;
use crate::tile::{Heightfield, sample_row};

/// A pool size for tile generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileWorkers {
    threads: usize,
}

impl TileWorkers {
    /// `threads == 0` picks one worker per logical core.
    pub fn new(threads: usize) -> Self {
        let threads = if threads == 0 { num_cpus::get() } else { threads };
        Self {
            threads: threads.max(1),
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Sample `tile` with up to `threads` workers.
    pub fn generate<S: HeightSource>(
        &self,
        generator: &TerrainGenerator<S>,
        tile: &TileConfig,
    ) -> Result<Heightfield, AppError> {
        let resolution = tile.resolution as usize;
        let mut field = Heightfield::flat(resolution);
        if resolution == 0 {
            return Ok(field);
        }

        let (row_sender, row_receiver) = bounded::<usize>(resolution);
        queue_rows(&row_sender, resolution, &tile.name)?;
        drop(row_sender);

        let (result_sender, result_receiver) = unbounded::<(usize, Vec<f32>)>();
        let worker_count = self.threads.min(resolution);

        std::thread::scope(|scope| -> Result<(), AppError> {
            for i in 0..worker_count {
                let rows = row_receiver.clone();
                let results = result_sender.clone();
                std::thread::Builder::new()
                    .name(format!("tile-worker-{i}"))
                    .spawn_scoped(scope, move || {
                        while let Ok(y) = rows.recv() {
                            let row = sample_row(generator, tile, y);
                            if results.send((y, row)).is_err() {
                                break;
                            }
                        }
                    })
                    .map_err(AppError::Spawn)?;
            }
            drop(result_sender);

            for (y, row) in result_receiver.iter() {
                field.row_mut(y).copy_from_slice(&row);
            }
            Ok(())
        })?;

        tracing::debug!(tile = %tile.name, workers = worker_count, "tile sampled");
        Ok(field)
    }
}

/// Queue rows `0..resolution` without blocking. The queue's capacity must
/// cover every row.
fn queue_rows(sender: &Sender<usize>, resolution: usize, tile: &str) -> Result<(), AppError> {
    for y in 0..resolution {
        sender
            .try_send(y)
            .map_err(|_| AppError::RowQueueRejected {
                tile: tile.to_string(),
                row: y,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::generate_tile;
    use strata_terrain::{BiomeBlender, BiomeDef, BiomeSet, BlendSettings};

    fn generator() -> TerrainGenerator {
        let biomes = BiomeSet::new(vec![
            BiomeDef::new("low", 0.0, 20.0, 0.01),
            BiomeDef::new("high", 50.0, 100.0, 0.005).with_fbm(4, 2.0, 0.5),
        ])
        .unwrap();
        TerrainGenerator::new(
            12345,
            BiomeBlender::new(
                biomes,
                BlendSettings {
                    biome_scale: 0.002,
                    blend_width: 0.5,
                },
            ),
        )
    }

    fn tile(resolution: u32) -> TileConfig {
        TileConfig {
            name: "test".to_string(),
            origin_x: -300.0,
            origin_z: 700.0,
            size_x: 800.0,
            size_z: 800.0,
            resolution,
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let generator = generator();
        let t = tile(65);
        let serial = generate_tile(&generator, &t);
        for threads in [1, 3, 8] {
            let parallel = TileWorkers::new(threads).generate(&generator, &t).unwrap();
            assert_eq!(serial, parallel, "{threads} workers diverged from serial");
        }
    }

    #[test]
    fn test_more_workers_than_rows() {
        let generator = generator();
        let t = tile(2);
        let field = TileWorkers::new(16).generate(&generator, &t).unwrap();
        assert_eq!(field, generate_tile(&generator, &t));
    }

    #[test]
    fn test_queue_rows_fills_queue_in_order() {
        let (sender, receiver) = bounded(4);
        queue_rows(&sender, 4, "t").unwrap();
        drop(sender);
        assert_eq!(receiver.iter().collect::<Vec<usize>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_queue_rows_reports_disconnected_queue() {
        let (sender, receiver) = bounded(4);
        drop(receiver);
        let err = queue_rows(&sender, 4, "tile_0_0").unwrap_err();
        assert!(matches!(err, AppError::RowQueueRejected { ref tile, row: 0 } if tile == "tile_0_0"));
        assert!(err.to_string().contains("tile_0_0"));
    }

    #[test]
    fn test_queue_rows_reports_full_queue() {
        let (sender, _receiver) = bounded(2);
        let err = queue_rows(&sender, 3, "small").unwrap_err();
        assert!(matches!(err, AppError::RowQueueRejected { row: 2, .. }));
    }

    #[test]
    fn test_zero_threads_uses_all_cores() {
        assert_eq!(TileWorkers::new(0).threads(), num_cpus::get().max(1));
        assert_eq!(TileWorkers::new(5).threads(), 5);
    }
}
