//! Biome selection and blending.
//!
//! A low-frequency noise field picks a fractional position along the ordered
//! [`BiomeSet`]. The two biomes bracketing that position are sampled and mixed
//! with a smooth-stepped weight, so heights stay continuous as the selection
//! crosses from one biome pair to the next.

use serde::{Deserialize, Serialize};

use crate::biome::{BiomeHeightSampler, BiomeSet, FbmRange};
use crate::simplex::GradientNoise2D;

/// Global parameters for biome selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendSettings {
    /// Frequency of the biome-selection noise, independent of each biome's
    /// own `noise_scale`. Default: 0.0002.
    pub biome_scale: f32,
    /// Width of the transition band as a fraction of one biome step, in
    /// `(0, 1]`. Small values give near-binary edges. Default: 0.1.
    pub blend_width: f32,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            biome_scale: 0.0002,
            blend_width: 0.1,
        }
    }
}

/// The two biomes contributing at a point and the weight of the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeSelection {
    pub biome_a: usize,
    pub biome_b: usize,
    /// Weight of `biome_b`, in `[0, 1]`.
    pub blend: f32,
}

impl BiomeSelection {
    /// Resolve a normalized selection value in `[0, 1]` against `biome_count`
    /// biomes.
    ///
    /// At `value == 1` both indices collapse onto the last biome; at
    /// `value == 0` the weight is zero, so the first biome is returned pure.
    pub fn from_value(value: f32, biome_count: usize, blend_width: f32) -> Self {
        let last = biome_count.saturating_sub(1) as i64;
        let biome_pos = value * last as f32;
        let index = libm::floorf(biome_pos);
        let index_i = index as i64;

        let biome_a = index_i.clamp(0, last) as usize;
        let biome_b = index_i.saturating_add(1).clamp(0, last) as usize;
        let blend = smoothstep((biome_pos - index) / blend_width);

        Self {
            biome_a,
            biome_b,
            blend,
        }
    }

    /// Returns `true` if both indices name the same biome.
    ///
    /// A zero weight is not pure: the second biome is still sampled so that
    /// a non-finite height there reaches the result.
    pub fn is_pure(&self) -> bool {
        self.biome_a == self.biome_b
    }
}

/// Cubic Hermite `3t^2 - 2t^3`, with `t` clamped to `[0, 1]` first.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Maps world coordinates to heights by blending adjacent biomes.
#[derive(Clone, Debug)]
pub struct BiomeBlender {
    biomes: BiomeSet,
    settings: BlendSettings,
    sampler: BiomeHeightSampler,
}

impl BiomeBlender {
    pub fn new(biomes: BiomeSet, settings: BlendSettings) -> Self {
        tracing::debug!(
            biomes = biomes.count(),
            biome_scale = settings.biome_scale,
            blend_width = settings.blend_width,
            "biome blender configured"
        );
        Self {
            biomes,
            settings,
            sampler: BiomeHeightSampler::default(),
        }
    }

    /// Choose how per-biome fBm sums are normalized.
    pub fn with_fbm_range(mut self, range: FbmRange) -> Self {
        self.sampler = BiomeHeightSampler::new(range);
        self
    }

    pub fn biomes(&self) -> &BiomeSet {
        &self.biomes
    }

    pub fn settings(&self) -> &BlendSettings {
        &self.settings
    }

    pub fn fbm_range(&self) -> FbmRange {
        self.sampler.range
    }

    /// The biome-selection noise at a point, remapped to `[0, 1]`.
    pub fn selection_value(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32 {
        let scale = self.settings.biome_scale;
        (noise.noise(world_x * scale, world_z * scale) + 1.0) * 0.5
    }

    /// Which biomes contribute at a point, and how much.
    pub fn select(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> BiomeSelection {
        let value = self.selection_value(noise, world_x, world_z);
        BiomeSelection::from_value(value, self.biomes.count(), self.settings.blend_width)
    }

    /// Blended terrain height at a world coordinate.
    pub fn sample_height(&self, noise: &GradientNoise2D, world_x: f32, world_z: f32) -> f32 {
        let selection = self.select(noise, world_x, world_z);
        self.blend_selection(noise, &selection, world_x, world_z)
    }

    /// Height for an already resolved selection.
    pub fn blend_selection(
        &self,
        noise: &GradientNoise2D,
        selection: &BiomeSelection,
        world_x: f32,
        world_z: f32,
    ) -> f32 {
        let h_a = self.biome_height(noise, selection.biome_a, world_x, world_z);
        if selection.is_pure() {
            return h_a;
        }
        let h_b = self.biome_height(noise, selection.biome_b, world_x, world_z);
        h_a + (h_b - h_a) * selection.blend
    }

    /// Height of the biome at `index`, unblended.
    pub fn biome_height(
        &self,
        noise: &GradientNoise2D,
        index: usize,
        world_x: f32,
        world_z: f32,
    ) -> f32 {
        self.sampler
            .sample(noise, self.biomes.get(index), world_x, world_z)
    }
}
