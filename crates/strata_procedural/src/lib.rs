//! # STRATA Procedural Terrain
//!
//! Chunked voxel terrain from a seeded 2D noise height field.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same config and seed always yield the same placements
//! 2. **Chunked**: One chunk buffer alive at a time, dropped after flushing
//! 3. **Culled**: Fully buried blocks are never emitted
//! 4. **Parallel inside a chunk**: Classification and culling fork on a
//!    bounded worker pool; chunks themselves run in order
//!
//! ## Core Components
//!
//! - `SimplexNoise`: Seeded 2D noise in `[-1, 1]`
//! - `GenerationConfig`: Noise settings, chunk size, chunk count, prefab
//! - `classify_chunk`: Fills a chunk buffer with `Solid` / `Empty`
//! - `emit_exposed`: Collects placements for exposed solid blocks
//! - `WorldGenerator`: Runs the whole pass into a `PlacementSink`
//!
//! ## Example
//!
//! ```rust
//! use strata_procedural::{
//!     ChunkDimensions, GenerationConfig, GeneratorOptions, NoiseSettings, PlacementRequest,
//!     WorldGenerator,
//! };
//!
//! let config = GenerationConfig {
//!     noise: NoiseSettings { seed: 12345, ..NoiseSettings::default() },
//!     chunk_size: ChunkDimensions::new(16, 32, 16),
//!     chunk_count: 9,
//!     ..GenerationConfig::default()
//! };
//!
//! let generator = WorldGenerator::new(config, GeneratorOptions::default()).unwrap();
//! let mut placed: Vec<PlacementRequest> = Vec::new();
//! let report = generator.generate(&mut placed).unwrap();
//!
//! assert_eq!(report.chunks_generated(), 9);
//! assert_eq!(report.emitted(), placed.len());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod classifier;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod layout;
pub mod noise;
pub mod placement;
pub mod seed;

pub use block::{BlockType, ChunkBlockBuffer};
pub use classifier::{classify_chunk, remap, terrain_height};
pub use config::{ChunkDimensions, GenerationConfig, NoiseSettings, PrefabHandle};
pub use emitter::{emit_exposed, is_exposed};
pub use error::{GenerationError, GenerationResult};
pub use generator::{
    CancellationToken, ChunkReport, GenerationReport, GeneratorOptions, GeneratorState,
    WorldGenerator,
};
pub use layout::{
    chunk_offset, grid_side, linear_index, position_from_index, BlockPos, ChunkLayout,
    ChunkOffset, ChunkSize, LocalPos,
};
pub use noise::{ConstantNoise, Noise2D, SimplexNoise, WorldSeed, MAX_SAMPLE_COORDINATE};
pub use placement::{EmittedPlacements, PlacementRequest, PlacementSink};
pub use seed::{resolve_seed, resolve_seed_with, SeedSource};
