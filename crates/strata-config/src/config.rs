//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strata_terrain::{BiomeDef, BlendSettings, FbmParams, FbmRange, UniformFbm};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Seed, height mode and biome selection settings.
    pub generation: GenerationConfig,
    /// Ordered biome list; adjacent entries blend into each other.
    pub biomes: Vec<BiomeDef>,
    /// Settings for the single-field fBm mode.
    pub uniform: UniformFbm,
    /// Settings for the offset Perlin mode.
    pub perlin: PerlinConfig,
    /// Heightmap tiles to generate.
    pub tiles: Vec<TileConfig>,
    /// Output settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which height source drives generation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum HeightMode {
    /// Biome-blended fBm.
    #[default]
    Biomes,
    /// One global fBm field.
    Fbm,
    /// Seed-offset Perlin noise.
    Perlin,
}

/// Seed and biome selection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// World seed.
    pub seed: u64,
    /// Height source.
    pub mode: HeightMode,
    /// Frequency of the biome-selection noise.
    pub biome_scale: f32,
    /// Transition width between adjacent biomes, in `(0, 1]`.
    pub biome_blend_width: f32,
    /// Whether per-biome fBm sums are clamped before scaling.
    pub fbm_range: FbmRange,
}

/// Offset Perlin settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerlinConfig {
    /// Frequency multiplier applied to world coordinates.
    pub noise_scale: f32,
    /// Height of a fully raised sample.
    pub height_multiplier: f32,
    /// Octave count; 1 samples plain Perlin noise.
    pub octaves: u32,
}

/// A square heightmap grid placed in world space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TileConfig {
    /// Tile name, also used as the output file stem.
    pub name: String,
    /// World X of the tile's first column.
    pub origin_x: f32,
    /// World Z of the tile's first row.
    pub origin_z: f32,
    /// World extent along X.
    pub size_x: f32,
    /// World extent along Z.
    pub size_z: f32,
    /// Samples per side (at least 2).
    pub resolution: u32,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one PNG per tile.
    pub directory: PathBuf,
    /// Height mapped to full white; heights are clamped to `[0, max_height]`.
    pub max_height: f32,
    /// Worker threads for tile generation (0 = one per core).
    pub threads: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            biomes: default_biomes(),
            uniform: UniformFbm::default(),
            perlin: PerlinConfig::default(),
            tiles: default_tiles(),
            output: OutputConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let blend = BlendSettings::default();
        Self {
            seed: 12345,
            mode: HeightMode::default(),
            biome_scale: blend.biome_scale,
            biome_blend_width: blend.blend_width,
            fbm_range: FbmRange::default(),
        }
    }
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            noise_scale: 0.0015,
            height_multiplier: 0.2,
            octaves: 1,
        }
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            name: "tile".to_string(),
            origin_x: 0.0,
            origin_z: 0.0,
            size_x: 1000.0,
            size_z: 1000.0,
            resolution: 513,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("heightmaps"),
            max_height: 600.0,
            threads: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

fn default_biomes() -> Vec<BiomeDef> {
    let fbm = FbmParams::default();
    vec![
        BiomeDef::new("lowlands", 0.0, 20.0, 0.004),
        BiomeDef::new("plains", 20.0, 40.0, 0.003),
        BiomeDef::new("hills", 40.0, 160.0, 0.004),
        BiomeDef::new("mountains", 120.0, 480.0, 0.002).with_fbm(6, fbm.lacunarity, fbm.gain),
    ]
}

fn default_tiles() -> Vec<TileConfig> {
    vec![
        TileConfig {
            name: "tile_0_0".to_string(),
            ..Default::default()
        },
        TileConfig {
            name: "tile_1_0".to_string(),
            origin_x: 1000.0,
            ..Default::default()
        },
    ]
}

// --- Derived settings ---

impl Config {
    /// Biome selection settings for the blender.
    pub fn blend_settings(&self) -> BlendSettings {
        BlendSettings {
            biome_scale: self.generation.biome_scale,
            blend_width: self.generation.biome_blend_width,
        }
    }

    /// Reject values the generator cannot work with.
    ///
    /// Lacunarity and gain are deliberately not checked: unusual values still
    /// produce a height field, just not a fractal one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.mode == HeightMode::Biomes && self.biomes.is_empty() {
            return Err(ConfigError::Validation(
                "biome mode needs at least one biome".to_string(),
            ));
        }
        let width = self.generation.biome_blend_width;
        if !(width > 0.0 && width <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "biome_blend_width must lie in (0, 1], got {width}"
            )));
        }
        if let Some(biome) = self.biomes.iter().find(|b| b.octaves == 0) {
            return Err(ConfigError::Validation(format!(
                "biome '{}' must have at least one octave",
                biome.name
            )));
        }
        if let Some(tile) = self.tiles.iter().find(|t| t.resolution < 2) {
            return Err(ConfigError::Validation(format!(
                "tile '{}' resolution must be at least 2, got {}",
                tile.name, tile.resolution
            )));
        }
        if !(self.output.max_height > 0.0) {
            return Err(ConfigError::Validation(format!(
                "output max_height must be positive, got {}",
                self.output.max_height
            )));
        }
        Ok(())
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

/// Platform config directory for Strata, if the OS provides one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("strata"))
}
