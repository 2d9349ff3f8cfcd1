//! Ordered biome sequence with name-based lookup.

use hashbrown::HashMap;

use super::BiomeDef;
use crate::error::TerrainError;

/// A non-empty, ordered list of biomes.
///
/// Order defines adjacency: biome `i` only ever blends with biome `i + 1`.
#[derive(Clone, Debug)]
pub struct BiomeSet {
    biomes: Vec<BiomeDef>,
    name_to_index: HashMap<String, usize>,
}

impl BiomeSet {
    /// Build a set from an ordered list.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmptyBiomeSet`] for an empty list and
    /// [`TerrainError::DuplicateBiomeName`] if two biomes share a name.
    pub fn new(biomes: Vec<BiomeDef>) -> Result<Self, TerrainError> {
        if biomes.is_empty() {
            return Err(TerrainError::EmptyBiomeSet);
        }

        let mut name_to_index = HashMap::with_capacity(biomes.len());
        for (index, biome) in biomes.iter().enumerate() {
            if name_to_index.insert(biome.name.clone(), index).is_some() {
                return Err(TerrainError::DuplicateBiomeName(biome.name.clone()));
            }
        }

        Ok(Self {
            biomes,
            name_to_index,
        })
    }

    /// A set holding exactly one biome.
    pub fn single(biome: BiomeDef) -> Self {
        let mut name_to_index = HashMap::with_capacity(1);
        name_to_index.insert(biome.name.clone(), 0);
        Self {
            biomes: vec![biome],
            name_to_index,
        }
    }

    /// Returns the biome at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn get(&self, index: usize) -> &BiomeDef {
        &self.biomes[index]
    }

    /// Looks up a biome's position by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Number of biomes; always at least 1.
    pub fn count(&self) -> usize {
        self.biomes.len()
    }

    pub fn first(&self) -> &BiomeDef {
        &self.biomes[0]
    }

    pub fn last(&self) -> &BiomeDef {
        &self.biomes[self.biomes.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiomeDef> {
        self.biomes.iter()
    }
}
