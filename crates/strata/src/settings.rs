//! # World Settings
//!
//! The authored description of a world, as a TOML file:
//!
//! ```toml
//! [noise]
//! seed = 0            # 0 = pick one at startup; "0x..." or "123" for
//!                     # seeds above i64::MAX
//! frequency = 0.05
//! amplitude = 1.0
//! min = 0.2
//! max = 0.8
//!
//! [chunks]
//! size = [16, 32, 16] # or a single number for cubes
//! count = 16          # must be a perfect square
//!
//! [placement]
//! prefab = "grass"
//!
//! [execution]
//! worker_threads = 0  # 0 = one per core
//! columns_per_batch = 4
//! ```
//!
//! Every key is optional. [`WorldSettings::bake`] resolves the prefab name
//! and produces the plain values the generator takes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use strata_procedural::{
    ChunkDimensions, GenerationConfig, GeneratorOptions, NoiseSettings, PrefabHandle,
};

use crate::error::{SettingsError, SettingsResult};

/// Root of a world settings file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldSettings {
    /// Height-field noise.
    #[serde(default)]
    pub noise: NoiseSection,
    /// Chunk size and count.
    #[serde(default)]
    pub chunks: ChunkSection,
    /// What to place.
    #[serde(default)]
    pub placement: PlacementSection,
    /// Worker pool and batching.
    #[serde(default)]
    pub execution: ExecutionSection,
}

/// `[noise]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseSection {
    /// Noise seed; zero draws one at startup.
    ///
    /// TOML integers stop at `i64::MAX`, so the full `u64` range is also
    /// accepted as a decimal or `0x` hex string.
    #[serde(default, deserialize_with = "deserialize_seed")]
    pub seed: u64,
    /// World-coordinate multiplier.
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    /// Height multiplier.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Remap target for noise -1.
    #[serde(default = "default_min")]
    pub min: f64,
    /// Remap target for noise +1.
    #[serde(default = "default_max")]
    pub max: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeed {
    Int(u64),
    Text(String),
}

fn deserialize_seed<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match RawSeed::deserialize(deserializer)? {
        RawSeed::Int(seed) => Ok(seed),
        RawSeed::Text(text) => parse_seed(text.trim()).map_err(serde::de::Error::custom),
    }
}

fn parse_seed(text: &str) -> Result<u64, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|err| format!("invalid seed {text:?}: {err}"))
}

fn default_frequency() -> f64 {
    NoiseSettings::default().frequency
}
fn default_amplitude() -> f64 {
    NoiseSettings::default().amplitude
}
fn default_min() -> f64 {
    NoiseSettings::default().remap_min
}
fn default_max() -> f64 {
    NoiseSettings::default().remap_max
}

impl Default for NoiseSection {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            min: default_min(),
            max: default_max(),
        }
    }
}

/// Chunk size: either one edge for a cube or explicit `[x, y, z]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChunkSizeSetting {
    /// Cubic chunks.
    Cube(i64),
    /// Per-axis size.
    Axes([i64; 3]),
}

impl Default for ChunkSizeSetting {
    fn default() -> Self {
        let dims = ChunkDimensions::default();
        Self::Axes([i64::from(dims.x), i64::from(dims.y), i64::from(dims.z)])
    }
}

impl ChunkSizeSetting {
    /// Converts to generator dimensions. Sign is left for the generator to
    /// validate; only the integer range is checked here.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::OutOfRange`] if an axis does not fit `i32`.
    pub fn to_dimensions(self) -> SettingsResult<ChunkDimensions> {
        let [x, y, z] = match self {
            Self::Cube(edge) => [edge; 3],
            Self::Axes(axes) => axes,
        };
        Ok(ChunkDimensions::new(
            to_i32("chunks.size", x)?,
            to_i32("chunks.size", y)?,
            to_i32("chunks.size", z)?,
        ))
    }
}

/// `[chunks]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkSection {
    /// Chunk dimensions.
    #[serde(default)]
    pub size: ChunkSizeSetting,
    /// Number of chunks.
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_count() -> i64 {
    1
}

impl Default for ChunkSection {
    fn default() -> Self {
        Self {
            size: ChunkSizeSetting::default(),
            count: default_count(),
        }
    }
}

/// `[placement]` table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementSection {
    /// Registered prefab name.
    #[serde(default = "default_prefab")]
    pub prefab: String,
}

fn default_prefab() -> String {
    "grass".to_owned()
}

impl Default for PlacementSection {
    fn default() -> Self {
        Self {
            prefab: default_prefab(),
        }
    }
}

/// `[execution]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionSection {
    /// Worker threads; zero means one per core.
    #[serde(default)]
    pub worker_threads: usize,
    /// Columns per parallel batch.
    #[serde(default = "default_columns_per_batch")]
    pub columns_per_batch: usize,
}

fn default_columns_per_batch() -> usize {
    GeneratorOptions::default().columns_per_batch
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            columns_per_batch: default_columns_per_batch(),
        }
    }
}

/// Maps prefab names to the handles the sink understands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefabRegistry {
    by_name: BTreeMap<String, PrefabHandle>,
}

impl PrefabRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `grass` block at handle 1.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("grass", PrefabHandle::new(1));
        registry
    }

    /// Registers (or replaces) a prefab. Returns the previous handle.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handle: PrefabHandle,
    ) -> Option<PrefabHandle> {
        self.by_name.insert(name.into(), handle)
    }

    /// Looks up a prefab by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PrefabHandle> {
        self.by_name.get(name).copied()
    }

    /// Looks up a prefab by name, failing with the list of known names.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownPrefab`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> SettingsResult<PrefabHandle> {
        self.get(name).ok_or_else(|| SettingsError::UnknownPrefab {
            name: name.to_owned(),
            known: self.by_name.keys().cloned().collect::<Vec<_>>().join(", "),
        })
    }
}

impl WorldSettings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed TOML, unknown keys or
    /// wrongly typed values.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Read`] if the file cannot be read, otherwise
    /// as [`WorldSettings::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolves names and produces the generator's config and options.
    ///
    /// Value ranges (positive sizes, square counts, finite noise) are left to
    /// [`GenerationConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownPrefab`] or
    /// [`SettingsError::OutOfRange`].
    pub fn bake(
        &self,
        registry: &PrefabRegistry,
    ) -> SettingsResult<(GenerationConfig, GeneratorOptions)> {
        let config = GenerationConfig {
            noise: NoiseSettings {
                seed: self.noise.seed,
                frequency: self.noise.frequency,
                amplitude: self.noise.amplitude,
                remap_min: self.noise.min,
                remap_max: self.noise.max,
            },
            chunk_size: self.chunks.size.to_dimensions()?,
            chunk_count: to_i32("chunks.count", self.chunks.count)?,
            placement_prefab: registry.resolve(&self.placement.prefab)?,
        };
        let options = GeneratorOptions {
            worker_threads: self.execution.worker_threads,
            columns_per_batch: self.execution.columns_per_batch,
        };
        Ok((config, options))
    }
}

fn to_i32(field: &'static str, value: i64) -> SettingsResult<i32> {
    i32::try_from(value).map_err(|_| SettingsError::OutOfRange { field, value })
}
