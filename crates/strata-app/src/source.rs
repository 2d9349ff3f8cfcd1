//! Builds the terrain generator selected by the config.

use strata_config::{Config, HeightMode};
use strata_terrain::{BiomeBlender, BiomeSet, HeightSource, OffsetPerlin, TerrainGenerator};

use crate::error::AppError;

/// Generator over whichever height source `config.generation.mode` names.
pub type DynGenerator = TerrainGenerator<Box<dyn HeightSource>>;

pub fn build_generator(config: &Config) -> Result<DynGenerator, AppError> {
    let generation = &config.generation;
    let source: Box<dyn HeightSource> = match generation.mode {
        HeightMode::Biomes => {
            let biomes = BiomeSet::new(config.biomes.clone())?;
            Box::new(
                BiomeBlender::new(biomes, config.blend_settings())
                    .with_fbm_range(generation.fbm_range),
            )
        }
        HeightMode::Fbm => Box::new(config.uniform),
        HeightMode::Perlin => {
            let perlin = &config.perlin;
            Box::new(OffsetPerlin::new(
                perlin.noise_scale,
                perlin.height_multiplier,
                perlin.octaves,
            ))
        }
    };
    tracing::info!(mode = ?generation.mode, seed = generation.seed, "height source ready");
    Ok(TerrainGenerator::new(generation.seed, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_terrain::{BiomeDef, FbmRange, TerrainError, UniformFbm};

    #[test]
    fn test_biome_mode_matches_direct_blender() {
        let config = Config::default();
        let generator = build_generator(&config).unwrap();
        let direct = TerrainGenerator::new(
            config.generation.seed,
            BiomeBlender::new(BiomeSet::new(config.biomes.clone()).unwrap(), config.blend_settings()),
        );
        for i in 0..50 {
            let (x, z) = (i as f32 * 311.0, i as f32 * -127.0);
            assert_eq!(generator.sample_height(x, z), direct.sample_height(x, z));
        }
    }

    #[test]
    fn test_fbm_mode_uses_uniform_settings() {
        let mut config = Config::default();
        config.generation.mode = HeightMode::Fbm;
        config.uniform.height_multiplier = 3.0;
        config.uniform.range = FbmRange::Clamped;
        let generator = build_generator(&config).unwrap();
        let direct = TerrainGenerator::new(config.generation.seed, config.uniform);
        for i in 0..50 {
            let (x, z) = (i as f32 * 71.0, i as f32 * 13.0);
            let h = generator.sample_height(x, z);
            assert_eq!(h, direct.sample_height(x, z));
            assert!((0.0..=3.0).contains(&h));
        }
        assert_ne!(config.uniform, UniformFbm::default());
    }

    #[test]
    fn test_perlin_mode_in_range() {
        let mut config = Config::default();
        config.generation.mode = HeightMode::Perlin;
        config.perlin.height_multiplier = 2.0;
        let generator = build_generator(&config).unwrap();
        for i in 0..100 {
            let h = generator.sample_height(i as f32 * 97.0, i as f32 * 43.0);
            assert!((0.0..=2.0).contains(&h), "{h}");
        }
    }

    #[test]
    fn test_duplicate_biome_is_rejected() {
        let mut config = Config::default();
        config.biomes.push(BiomeDef::new("plains", 0.0, 1.0, 0.01));
        let result = build_generator(&config);
        assert!(matches!(
            result,
            Err(AppError::Terrain(TerrainError::DuplicateBiomeName(ref name))) if name == "plains"
        ));
    }
}
