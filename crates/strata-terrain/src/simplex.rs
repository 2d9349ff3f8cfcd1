//! Seeded 2D simplex noise.
//!
//! [`GradientNoise2D`] owns its permutation table outright, so any number of
//! independently seeded generators can coexist and be shared read-only across
//! threads. Re-seeding takes `&mut self` and therefore can never overlap with
//! sampling.

use glam::Vec2;
use noise::NoiseFn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Skew factor into the triangular lattice, `(sqrt(3) - 1) / 2`.
const F2: f32 = 0.366_025_4;
/// Unskew factor back to input space, `(3 - sqrt(3)) / 6`.
const G2: f32 = 0.211_324_87;
/// Maps the raw corner sum into roughly `[-1, 1]`.
const OUTPUT_SCALE: f32 = 70.0;

/// The eight fixed gradient directions, shared by every seed.
pub const GRADIENTS: [Vec2; 8] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

/// A seeded shuffle of `0..256`, stored twice so that `index + perm[other]`
/// never needs to wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    /// Number of distinct entries before duplication.
    pub const SIZE: usize = 256;

    /// Build the table for `seed` with a Fisher-Yates shuffle driven by ChaCha8.
    ///
    /// The same seed always yields the same table, on every platform.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut shuffled: [u8; Self::SIZE] = std::array::from_fn(|i| i as u8);

        for i in (1..Self::SIZE).rev() {
            let swap = rng.random_range(0..=i);
            shuffled.swap(i, swap);
        }

        Self {
            perm: std::array::from_fn(|i| shuffled[i & 255]),
        }
    }

    /// Entry at `index`; valid for `index < 512`.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.perm[index] as usize
    }
}

/// Deterministic 2D simplex noise returning values in approximately `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct GradientNoise2D {
    seed: u64,
    perm: PermutationTable,
}

impl GradientNoise2D {
    /// Create a generator for `seed`.
    pub fn new(seed: u64) -> Self {
        tracing::debug!(seed, "building simplex permutation table");
        Self {
            seed,
            perm: PermutationTable::new(seed),
        }
    }

    /// Rebuild the permutation table for a new seed.
    ///
    /// The previous noise field is discarded wholesale; nothing carries over
    /// from the old seed.
    pub fn initialize(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// The seed the current table was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample the noise field at `(x, y)`.
    ///
    /// NaN inputs produce NaN; no input panics.
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        let s = (x + y) * F2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);

        // Summed in f32 so huge cell indices cannot overflow.
        let t = (i as f32 + j as f32) * G2;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);

        // Picks which half of the lattice cell the point lies in.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let perm = &self.perm;

        let g0 = perm.get(ii + perm.get(jj)) & 7;
        let g1 = perm.get(ii + i1 + perm.get(jj + j1)) & 7;
        let g2 = perm.get(ii + 1 + perm.get(jj + 1)) & 7;

        let n0 = corner_contribution(g0, x0, y0);
        let n1 = corner_contribution(g1, x1, y1);
        let n2 = corner_contribution(g2, x2, y2);

        OUTPUT_SCALE * (n0 + n1 + n2)
    }
}

impl NoiseFn<f64, 2> for GradientNoise2D {
    fn get(&self, point: [f64; 2]) -> f64 {
        f64::from(self.noise(point[0] as f32, point[1] as f32))
    }
}

/// Floor toward negative infinity, as a lattice index.
#[inline]
pub(crate) fn fast_floor(v: f32) -> i32 {
    libm::floorf(v) as i32
}

#[inline]
fn corner_contribution(gradient: usize, x: f32, y: f32) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t <= 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    t2 * t2 * GRADIENTS[gradient].dot(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    static_assertions::assert_impl_all!(GradientNoise2D: Send, Sync);

    #[test]
    fn test_permutation_table_is_a_permutation() {
        let table = PermutationTable::new(7);
        let mut seen = [false; 256];
        for i in 0..256 {
            let v = table.get(i);
            assert!(!seen[v], "value {v} appears twice");
            seen[v] = true;
            assert_eq!(table.get(i + 256), v, "second half differs at {i}");
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_permutation_table_deterministic() {
        assert_eq!(PermutationTable::new(12345), PermutationTable::new(12345));
        assert_ne!(PermutationTable::new(1), PermutationTable::new(2));
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let a = GradientNoise2D::new(42);
        let b = GradientNoise2D::new(42);
        for i in 0..200 {
            let x = i as f32 * 0.37 - 20.0;
            let y = i as f32 * -0.53 + 11.0;
            assert_eq!(a.noise(x, y).to_bits(), b.noise(x, y).to_bits());
            assert_eq!(a.noise(x, y).to_bits(), a.noise(x, y).to_bits());
        }
    }

    #[test]
    fn test_reinitialize_restores_field() {
        let mut noise = GradientNoise2D::new(12345);
        let before: Vec<f32> = (0..100).map(|i| noise.noise(i as f32 * 0.7, 3.1)).collect();

        noise.initialize(999);
        assert_eq!(noise.seed(), 999);
        noise.initialize(12345);

        let after: Vec<f32> = (0..100).map(|i| noise.noise(i as f32 * 0.7, 3.1)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_range_over_random_coordinates() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF);
        for seed in 0..4 {
            let noise = GradientNoise2D::new(seed);
            for _ in 0..20_000 {
                let x = rng.random_range(-1000.0_f32..1000.0);
                let y = rng.random_range(-1000.0_f32..1000.0);
                let v = noise.noise(x, y);
                assert!(
                    (-1.01..=1.01).contains(&v),
                    "noise({x}, {y}) = {v} escaped [-1, 1] for seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = GradientNoise2D::new(1);
        let b = GradientNoise2D::new(2);
        let differing = (0..100)
            .map(|i| (i as f32 * 1.37 + 0.5, i as f32 * 0.91 - 7.25))
            .filter(|&(x, y)| a.noise(x, y) != b.noise(x, y))
            .count();
        assert!(differing >= 1, "seeds 1 and 2 produced identical samples");
    }

    #[test]
    fn test_lattice_origin_is_zero() {
        for seed in [0, 1, 12345, u64::MAX] {
            assert_eq!(GradientNoise2D::new(seed).noise(0.0, 0.0), 0.0);
        }
    }

    #[test]
    fn test_floor_rounds_toward_negative_infinity() {
        assert_eq!(fast_floor(0.0), 0);
        assert_eq!(fast_floor(0.999), 0);
        assert_eq!(fast_floor(-0.001), -1);
        assert_eq!(fast_floor(-2.0), -2);
        assert_eq!(fast_floor(-2.5), -3);
    }

    #[test]
    fn test_continuous_across_negative_axis() {
        let noise = GradientNoise2D::new(3);
        let step = 1e-3;
        let mut prev = noise.noise(-3.0, -1.7);
        for i in 1..6000 {
            let x = -3.0 + i as f32 * step;
            let v = noise.noise(x, -1.7);
            assert!((v - prev).abs() < 0.05, "jump at x={x}: {prev} -> {v}");
            prev = v;
        }
    }

    #[test]
    fn test_diagonal_tie_break_is_continuous() {
        let noise = GradientNoise2D::new(11);
        for i in 0..200 {
            let base = i as f32 * 0.173 - 17.0;
            let on = noise.noise(base, base);
            let above = noise.noise(base, base + 1e-4);
            let below = noise.noise(base + 1e-4, base);
            assert!((on - above).abs() < 5e-3);
            assert!((on - below).abs() < 5e-3);
        }
    }

    #[test]
    fn test_nan_propagates() {
        let noise = GradientNoise2D::new(5);
        assert!(noise.noise(f32::NAN, 0.0).is_nan());
        assert!(noise.noise(1.5, f32::NAN).is_nan());
    }

    #[test]
    fn test_infinite_input_does_not_panic() {
        let noise = GradientNoise2D::new(5);
        let _ = noise.noise(f32::INFINITY, 0.0);
        let _ = noise.noise(f32::NEG_INFINITY, f32::INFINITY);
    }

    #[test]
    fn test_noise_fn_matches_direct_sampling() {
        let noise = GradientNoise2D::new(77);
        let direct = noise.noise(12.5, -3.25);
        let via_trait = noise.get([12.5, -3.25]);
        assert_eq!(via_trait, f64::from(direct));
    }
}
