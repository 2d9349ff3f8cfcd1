//! Terrain generator: a seeded noise field plus a height source.
//!
//! [`TerrainGenerator`] is the entry point hosts talk to. It owns one
//! [`GradientNoise2D`] and evaluates a [`HeightSource`] against it, so the
//! only mutable operation is re-seeding.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::biome::FbmRange;
use crate::blend::BiomeBlender;
use crate::fbm::{FbmParams, fbm_with};
use crate::simplex::GradientNoise2D;

/// Maps a world coordinate to a height, given the generator's noise field.
///
/// Implementations must be pure: the same noise state and coordinate always
/// produce the same height.
pub trait HeightSource: Send + Sync {
    fn sample_height(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32;
}

impl HeightSource for BiomeBlender {
    fn sample_height(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32 {
        BiomeBlender::sample_height(self, noise, world_x, world_z)
    }
}

impl<S: HeightSource + ?Sized> HeightSource for Box<S> {
    fn sample_height(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32 {
        (**self).sample_height(noise, world_x, world_z)
    }
}

/// A single global fBm field, without biomes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformFbm {
    /// Frequency multiplier applied to world coordinates. Default: 0.0015.
    pub noise_scale: f32,
    /// Height of a fully raised sample. Default: 0.2.
    pub height_multiplier: f32,
    pub fbm: FbmParams,
    pub range: FbmRange,
}

impl Default for UniformFbm {
    fn default() -> Self {
        Self {
            noise_scale: 0.0015,
            height_multiplier: 0.2,
            fbm: FbmParams::default(),
            range: FbmRange::default(),
        }
    }
}

impl HeightSource for UniformFbm {
    fn sample_height(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32 {
        let n = fbm_with(
            noise,
            world_x * self.noise_scale,
            world_z * self.noise_scale,
            &self.fbm,
        );
        self.range.normalize(n) * self.height_multiplier
    }
}

const SEED_OFFSET_SCALE: f64 = 0.001;
const SEED_OFFSET_X: f64 = 131.37;
const SEED_OFFSET_Z: f64 = 719.91;
const OCTAVE_SEED_STEP: u64 = 101;

/// Classic Perlin noise where the seed only shifts the sampling position.
///
/// The underlying Perlin table is fixed; the generator seed (low 32 bits) is
/// turned into a coordinate offset instead. With more than one octave each
/// octave uses its own offset (`seed + i * 101`), frequency doubling and
/// amplitude halving. Each octave is clamped to `[0, 1]` and the sum is
/// divided by the total amplitude, so output stays in `[0, height_multiplier]`.
#[derive(Clone, Debug)]
pub struct OffsetPerlin {
    perlin: Perlin,
    noise_scale: f32,
    height_multiplier: f32,
    octaves: u32,
}

impl OffsetPerlin {
    pub fn new(noise_scale: f32, height_multiplier: f32, octaves: u32) -> Self {
        Self {
            perlin: Perlin::new(Perlin::DEFAULT_SEED),
            noise_scale,
            height_multiplier,
            octaves,
        }
    }

    /// Perlin value in `[0, 1]` for one octave seed.
    fn sample_octave(&self, x: f64, z: f64, seed: u64) -> f64 {
        let offset = f64::from(seed as u32) * SEED_OFFSET_SCALE;
        let v = self
            .perlin
            .get([x + offset * SEED_OFFSET_X, z + offset * SEED_OFFSET_Z]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl HeightSource for OffsetPerlin {
    fn sample_height(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32 {
        let seed = noise.seed();
        let x = f64::from(world_x * self.noise_scale);
        let z = f64::from(world_z * self.noise_scale);

        let mut total = 0.0;
        let mut norm = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for i in 0..u64::from(self.octaves) {
            let octave_seed = seed.wrapping_add(i * OCTAVE_SEED_STEP);
            total += self.sample_octave(x * frequency, z * frequency, octave_seed) * amplitude;
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        if norm == 0.0 {
            return 0.0;
        }
        (total / norm) as f32 * self.height_multiplier
    }
}

/// Seeded terrain height field.
///
/// Sampling takes `&self` and may run on any number of threads at once;
/// [`initialize`](Self::initialize) needs `&mut self`, so it can never overlap
/// with sampling.
#[derive(Clone, Debug)]
pub struct TerrainGenerator<S = BiomeBlender> {
    noise: GradientNoise2D,
    source: S,
}

impl<S: HeightSource> TerrainGenerator<S> {
    pub fn new(seed: u64, source: S) -> Self {
        Self {
            noise: GradientNoise2D::new(seed),
            source,
        }
    }

    /// Rebuild all seed-dependent state.
    pub fn initialize(&mut self, seed: u64) {
        self.noise.initialize(seed);
        tracing::info!(seed, "terrain generator seeded");
    }

    /// Height at a world-space coordinate.
    pub fn sample_height(&self, world_x: f32, world_z: f32) -> f32 {
        self.source.sample_height(&self.noise, world_x, world_z)
    }

    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    pub fn noise(&self) -> &GradientNoise2D {
        &self.noise
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
