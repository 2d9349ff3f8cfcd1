//! Fractal Brownian motion (fBm) over [`GradientNoise2D`].
//!
//! Sums a fixed number of octaves at increasing frequency and decreasing
//! amplitude. The sum is not renormalized: its range grows with the octave
//! count and the gain, see [`FbmParams::max_amplitude`].

use serde::{Deserialize, Serialize};

use crate::simplex::GradientNoise2D;

/// Shape parameters for an fBm sum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmParams {
    /// Number of octaves to sum. Zero yields a constant 0.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f32,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub gain: f32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl FbmParams {
    pub fn new(octaves: u32, lacunarity: f32, gain: f32) -> Self {
        Self {
            octaves,
            lacunarity,
            gain,
        }
    }

    /// The `(frequency, amplitude)` schedule, starting at `(1, 1)`.
    pub fn octaves(&self) -> Octaves {
        Octaves {
            remaining: self.octaves,
            frequency: 1.0,
            amplitude: 1.0,
            lacunarity: self.lacunarity,
            gain: self.gain,
        }
    }

    /// Theoretical maximum absolute value of the sum (geometric series of
    /// amplitudes), assuming each octave stays within `[-1, 1]`.
    pub fn max_amplitude(&self) -> f32 {
        self.octaves().map(|o| o.amplitude.abs()).sum()
    }
}

/// A single term of an fBm sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    pub frequency: f32,
    pub amplitude: f32,
}

/// Iterator over the octaves of an [`FbmParams`] schedule.
#[derive(Clone, Debug)]
pub struct Octaves {
    remaining: u32,
    frequency: f32,
    amplitude: f32,
    lacunarity: f32,
    gain: f32,
}

impl Iterator for Octaves {
    type Item = Octave;

    fn next(&mut self) -> Option<Octave> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let octave = Octave {
            frequency: self.frequency,
            amplitude: self.amplitude,
        };
        self.frequency *= self.lacunarity;
        self.amplitude *= self.gain;
        Some(octave)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Octaves {}

/// Sum `octaves` layers of noise at `(x, y)`.
///
/// Every octave is always evaluated; there is no amplitude cutoff.
pub fn fbm(
    noise: &GradientNoise2D,
    x: f32,
    y: f32,
    octaves: u32,
    lacunarity: f32,
    gain: f32,
) -> f32 {
    fbm_with(noise, x, y, &FbmParams::new(octaves, lacunarity, gain))
}

/// [`fbm`] taking its shape from an [`FbmParams`].
pub fn fbm_with(noise: &GradientNoise2D, x: f32, y: f32, params: &FbmParams) -> f32 {
    let mut total = 0.0;
    for octave in params.octaves() {
        total += noise.noise(x * octave.frequency, y * octave.frequency) * octave.amplitude;
    }
    total
}
