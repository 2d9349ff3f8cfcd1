//! Biome parameter sets and per-biome height sampling.
//!
//! A [`BiomeSet`] is the ordered, non-empty list of [`BiomeDef`]s the blender
//! walks; [`BiomeHeightSampler`] turns one biome into a height via fBm.

mod def;
mod sampler;
mod set;

pub use def::BiomeDef;
pub use sampler::{BiomeHeightSampler, FbmRange, sample_biome_height};
pub use set::BiomeSet;
