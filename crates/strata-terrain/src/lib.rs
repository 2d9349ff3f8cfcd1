//! Procedural height fields: seeded simplex noise, fractal sums, and
//! biome-indexed blending.
//!
//! Everything here is a pure function of a seed, a biome list and a world
//! coordinate. Hosts build a [`TerrainGenerator`] once and call
//! [`TerrainGenerator::sample_height`] per cell, from as many threads as they
//! like.

mod error;
mod terrain;

pub mod biome;
pub mod blend;
pub mod fbm;
pub mod simplex;

pub use biome::{BiomeDef, BiomeHeightSampler, BiomeSet, FbmRange, sample_biome_height};
pub use blend::{BiomeBlender, BiomeSelection, BlendSettings, smoothstep};
pub use error::TerrainError;
pub use fbm::{FbmParams, Octave, Octaves, fbm, fbm_with};
pub use simplex::{GRADIENTS, GradientNoise2D, PermutationTable};
pub use terrain::{HeightSource, OffsetPerlin, TerrainGenerator, UniformFbm};
