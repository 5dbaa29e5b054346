//! # Generation Config
//!
//! The immutable value handed to the generator at startup. It is produced by
//! settings-loading code outside this crate and only read from here on.

use crate::error::{GenerationError, GenerationResult};
use crate::layout::{ChunkLayout, ChunkSize};
use crate::noise::MAX_SAMPLE_COORDINATE;

/// Opaque reference to the object the sink should instantiate.
///
/// The generator never interprets it; it is copied into every placement
/// request unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PrefabHandle(u64);

impl PrefabHandle {
    /// Wraps a raw handle value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Noise sampling and height-scaling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSettings {
    /// Noise seed. Zero means "pick a random seed at startup".
    pub seed: u64,
    /// Multiplier applied to world x/z before sampling.
    pub frequency: f64,
    /// Multiplier applied to the remapped noise value.
    pub amplitude: f64,
    /// Remap target for a raw noise value of -1.
    pub remap_min: f64,
    /// Remap target for a raw noise value of +1.
    pub remap_max: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 0.05,
            amplitude: 1.0,
            remap_min: 0.2,
            remap_max: 0.8,
        }
    }
}

/// Requested chunk dimensions, as authored. Validated into a [`ChunkSize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkDimensions {
    /// Width (x axis).
    pub x: i32,
    /// Height (y axis, vertical).
    pub y: i32,
    /// Depth (z axis).
    pub z: i32,
}

impl ChunkDimensions {
    /// Creates chunk dimensions.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates cubic chunk dimensions.
    #[inline]
    #[must_use]
    pub const fn cube(edge: i32) -> Self {
        Self::new(edge, edge, edge)
    }

    /// Converts to a [`ChunkSize`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidChunkDimensions`] if any axis is
    /// zero or negative.
    pub fn to_size(self) -> GenerationResult<ChunkSize> {
        let invalid = GenerationError::InvalidChunkDimensions {
            x: self.x,
            y: self.y,
            z: self.z,
        };
        let axis = |v: i32| usize::try_from(v).ok().filter(|&v| v > 0);
        match (axis(self.x), axis(self.y), axis(self.z)) {
            (Some(x), Some(y), Some(z)) => Ok(ChunkSize::new(x, y, z)),
            _ => Err(invalid),
        }
    }
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self::new(16, 32, 16)
    }
}

/// Everything the generator needs to know about the world to build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Noise parameters.
    pub noise: NoiseSettings,
    /// Size of one chunk's block grid.
    pub chunk_size: ChunkDimensions,
    /// Number of chunks, laid out on a square grid.
    pub chunk_count: i32,
    /// Handle forwarded to the placement sink.
    pub placement_prefab: PrefabHandle,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            noise: NoiseSettings::default(),
            chunk_size: ChunkDimensions::default(),
            chunk_count: 1,
            placement_prefab: PrefabHandle::default(),
        }
    }
}

impl GenerationConfig {
    /// Returns a copy with the noise seed replaced.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.noise.seed = seed;
        self
    }

    /// Validates the config and derives the chunk layout.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::InvalidChunkDimensions`] for non-positive axes.
    /// - [`GenerationError::InvalidChunkCount`] for a count below one.
    /// - [`GenerationError::NonSquareChunkCount`] if the count has no
    ///   integer square root.
    /// - [`GenerationError::NonFiniteParameter`] if a noise parameter, or
    ///   the largest possible terrain height, is NaN or infinite.
    /// - [`GenerationError::ExtentOverflow`] if indices or world
    ///   coordinates would overflow, or if `frequency` times the world
    ///   extent exceeds [`MAX_SAMPLE_COORDINATE`].
    pub fn validate(&self) -> GenerationResult<ChunkLayout> {
        let size = self.chunk_size.to_size()?;

        let count = usize::try_from(self.chunk_count)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(GenerationError::InvalidChunkCount(self.chunk_count))?;

        let noise = &self.noise;
        for (name, value) in [
            ("frequency", noise.frequency),
            ("amplitude", noise.amplitude),
            ("remap_min", noise.remap_min),
            ("remap_max", noise.remap_max),
        ] {
            ensure_finite(name, value)?;
        }

        #[allow(clippy::cast_precision_loss)]
        let peak = noise.remap_min.abs().max(noise.remap_max.abs())
            * noise.amplitude.abs()
            * (size.y - 1) as f64;
        ensure_finite("amplitude * remap * height", peak)?;

        let layout = ChunkLayout::new(size, count)?;

        // Layout construction bounds the extent to i32, so the product is exact.
        #[allow(clippy::cast_precision_loss)]
        let extent = (layout.side() * size.x.max(size.z)) as f64;
        let reach = noise.frequency.abs() * extent;
        if !reach.is_finite() || reach > MAX_SAMPLE_COORDINATE {
            return Err(GenerationError::ExtentOverflow(
                "noise sample coordinates exceed the simplex lattice range",
            ));
        }

        Ok(layout)
    }
}

fn ensure_finite(name: &'static str, value: f64) -> GenerationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GenerationError::NonFiniteParameter { name, value })
    }
}
