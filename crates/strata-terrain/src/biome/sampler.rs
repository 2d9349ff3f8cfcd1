//! Per-biome height sampling via fBm.

use serde::{Deserialize, Serialize};

use super::BiomeDef;
use crate::fbm::fbm;
use crate::simplex::GradientNoise2D;

/// How the raw fBm sum is mapped to `[0, 1]` before scaling.
///
/// The remap `(n + 1) / 2` assumes the sum stays within `[-1, 1]`, which only
/// holds approximately once more than one octave is summed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FbmRange {
    /// Keep the remapped value as is; excursions past the band pass through.
    #[default]
    Raw,
    /// Clamp the remapped value to `[0, 1]`, so heights stay within
    /// `[base_height, base_height + amplitude]`.
    Clamped,
}

impl FbmRange {
    /// Remap an fBm sum from `[-1, 1]` to `[0, 1]`.
    #[inline]
    pub fn normalize(self, n: f32) -> f32 {
        let n01 = (n + 1.0) * 0.5;
        match self {
            Self::Clamped => n01.clamp(0.0, 1.0),
            Self::Raw => n01,
        }
    }
}

/// Evaluates a single biome's height field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BiomeHeightSampler {
    pub range: FbmRange,
}

impl BiomeHeightSampler {
    pub fn new(range: FbmRange) -> Self {
        Self { range }
    }

    /// Height of `biome` at `(world_x, world_z)`.
    pub fn sample(
        &self,
        noise: &GradientNoise2D,
        biome: &BiomeDef,
        world_x: f32,
        world_z: f32,
    ) -> f32 {
        let n = fbm(
            noise,
            world_x * biome.noise_scale,
            world_z * biome.noise_scale,
            biome.octaves,
            biome.lacunarity,
            biome.gain,
        );
        biome.base_height + self.range.normalize(n) * biome.amplitude
    }
}

/// Height of `biome` at `(world_x, world_z)` with the default [`FbmRange`].
pub fn sample_biome_height(
    noise: &GradientNoise2D,
    biome: &BiomeDef,
    world_x: f32,
    world_z: f32,
) -> f32 {
    BiomeHeightSampler::default().sample(noise, biome, world_x, world_z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hills() -> BiomeDef {
        BiomeDef::new("hills", 0.0, 10.0, 1.0).with_fbm(3, 2.0, 0.5)
    }

    fn grid() -> impl Iterator<Item = (f32, f32)> {
        (0..100).flat_map(|gx| {
            (0..100).map(move |gz| (gx as f32 * 0.731 + 0.123, gz as f32 * 0.617 - 0.456))
        })
    }

    #[test]
    fn test_origin_is_mid_band() {
        let noise = GradientNoise2D::new(12345);
        let biome = BiomeDef::new("mid", 20.0, 10.0, 0.01).with_fbm(3, 2.0, 0.5);
        assert_eq!(sample_biome_height(&noise, &biome, 0.0, 0.0), 25.0);
    }

    #[test]
    fn test_matches_formula() {
        let noise = GradientNoise2D::new(3);
        let biome = BiomeDef::new("b", 5.0, 40.0, 0.02).with_fbm(4, 2.0, 0.5);
        let sampler = BiomeHeightSampler::new(FbmRange::Raw);
        let (x, z) = (123.0, -456.0);
        let n = fbm(&noise, x * 0.02, z * 0.02, 4, 2.0, 0.5);
        let expected = 5.0 + (n + 1.0) * 0.5 * 40.0;
        assert_eq!(sampler.sample(&noise, &biome, x, z), expected);
    }

    #[test]
    fn test_zero_amplitude_is_flat() {
        let noise = GradientNoise2D::new(1);
        let biome = BiomeDef::new("flat", 7.5, 0.0, 0.1);
        for (x, z) in grid().take(500) {
            assert_eq!(sample_biome_height(&noise, &biome, x, z), 7.5);
        }
    }

    /// The default remap is unclamped: `base + (n + 1) / 2 * amplitude`
    /// everywhere, including where the fBm sum leaves `[-1, 1]`.
    #[test]
    fn test_default_is_unclamped_formula() {
        let noise = GradientNoise2D::new(12345);
        let biome = hills();
        let mut outside = 0;
        for (x, z) in grid() {
            let n = fbm(&noise, x, z, 3, 2.0, 0.5);
            let expected = (n + 1.0) * 0.5 * 10.0;
            let h = sample_biome_height(&noise, &biome, x, z);
            assert_eq!(h, expected, "default remap differs at ({x}, {z})");
            if !(0.0..=10.0).contains(&h) {
                outside += 1;
            }
        }
        assert!(outside > 0, "expected some samples outside [0, 10]");
    }

    #[test]
    fn test_clamped_stays_in_band() {
        let noise = GradientNoise2D::new(12345);
        let biome = hills();
        let sampler = BiomeHeightSampler::new(FbmRange::Clamped);
        for (x, z) in grid() {
            let h = sampler.sample(&noise, &biome, x, z);
            assert!((0.0..=10.0).contains(&h), "height {h} at ({x}, {z}) left [0, 10]");
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(FbmRange::Clamped.normalize(-1.0), 0.0);
        assert_eq!(FbmRange::Clamped.normalize(1.0), 1.0);
        assert_eq!(FbmRange::Clamped.normalize(1.5), 1.0);
        assert_eq!(FbmRange::Raw.normalize(1.5), 1.25);
        assert_eq!(FbmRange::Raw.normalize(0.0), 0.5);
        assert!(FbmRange::Clamped.normalize(f32::NAN).is_nan());
        assert_eq!(FbmRange::default(), FbmRange::Raw);
    }
}
