//! Terrain error types.

/// Errors raised while assembling terrain inputs.
///
/// Sampling itself never fails; these are reported when a [`BiomeSet`] is
/// built.
///
/// [`BiomeSet`]: crate::BiomeSet
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    /// The biome list was empty.
    #[error("biome set must contain at least one biome")]
    EmptyBiomeSet,

    /// Two biomes share a name.
    #[error("duplicate biome name: {0}")]
    DuplicateBiomeName(String),
}
