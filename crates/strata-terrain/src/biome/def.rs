//! Biome definition: the height parameters of a single region type.

use serde::{Deserialize, Serialize};

use crate::fbm::FbmParams;

/// Height-generation parameters for one biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeDef {
    /// Human-readable identifier (e.g., "plains"). Unique within a set.
    pub name: String,
    /// Flat offset added to every sample.
    pub base_height: f32,
    /// Vertical scale applied to the normalized fBm value.
    pub amplitude: f32,
    /// Frequency multiplier applied to world coordinates before sampling.
    pub noise_scale: f32,
    /// Number of fBm octaves. Expected to be at least 1.
    pub octaves: u32,
    /// Per-octave frequency growth. Expected to be greater than 1.
    pub lacunarity: f32,
    /// Per-octave amplitude decay. Expected to lie in `(0, 1)`.
    pub gain: f32,
}

impl Default for BiomeDef {
    fn default() -> Self {
        let fbm = FbmParams::default();
        Self {
            name: String::new(),
            base_height: 0.0,
            amplitude: 0.0,
            noise_scale: 0.0,
            octaves: fbm.octaves,
            lacunarity: fbm.lacunarity,
            gain: fbm.gain,
        }
    }
}

impl BiomeDef {
    /// A biome with the default fBm shape (5 octaves, lacunarity 2, gain 0.5).
    pub fn new(name: impl Into<String>, base_height: f32, amplitude: f32, noise_scale: f32) -> Self {
        Self {
            name: name.into(),
            base_height,
            amplitude,
            noise_scale,
            ..Default::default()
        }
    }

    /// Replace the fBm shape.
    pub fn with_fbm(mut self, octaves: u32, lacunarity: f32, gain: f32) -> Self {
        self.octaves = octaves;
        self.lacunarity = lacunarity;
        self.gain = gain;
        self
    }

    pub fn fbm_params(&self) -> FbmParams {
        FbmParams::new(self.octaves, self.lacunarity, self.gain)
    }
}
