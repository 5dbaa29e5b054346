//! # STRATA
//!
//! Driver side of the terrain generator: loads a world settings file,
//! bakes it into a [`GenerationConfig`], and runs generation into a
//! placement sink.
//!
//! ## Example
//!
//! ```rust
//! use strata::{run_generation, CountingSink, PrefabRegistry, WorldSettings};
//!
//! let settings = WorldSettings::from_toml_str(
//!     r#"
//!     [noise]
//!     seed = 7
//!
//!     [chunks]
//!     size = [8, 16, 8]
//!     count = 4
//!     "#,
//! )
//! .unwrap();
//!
//! let mut sink = CountingSink::new();
//! let report = run_generation(&settings, &PrefabRegistry::with_builtin(), &mut sink).unwrap();
//! assert_eq!(report.emitted(), sink.placed());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod logging;
pub mod settings;
pub mod sinks;

pub use error::{AppError, AppResult, SettingsError, SettingsResult};
pub use logging::init_logging;
pub use settings::{
    ChunkSection, ChunkSizeSetting, ExecutionSection, NoiseSection, PlacementSection,
    PrefabRegistry, WorldSettings,
};
pub use sinks::{Bounds, CountingSink, SharedSink};

pub use strata_procedural::{GenerationConfig, GenerationReport, PlacementSink, WorldGenerator};

/// Bakes `settings` and runs one generation pass into `sink`.
///
/// # Errors
///
/// Returns [`AppError::Settings`] if the settings cannot be baked, or
/// [`AppError::Generation`] if the config is invalid or generation fails.
pub fn run_generation<S: PlacementSink + ?Sized>(
    settings: &WorldSettings,
    registry: &PrefabRegistry,
    sink: &mut S,
) -> AppResult<GenerationReport> {
    let (config, options) = settings.bake(registry)?;
    let generator = WorldGenerator::new(config, options)?;
    Ok(generator.generate(sink)?)
}
