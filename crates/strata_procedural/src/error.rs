//! # Generation Error Types
//!
//! Every failure the generator can report. All of them are fatal: the
//! pipeline is pure, so retrying would reproduce the same failure.

use thiserror::Error;

use crate::generator::GeneratorState;

/// Errors that can occur while validating a config or generating terrain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A chunk dimension was zero or negative.
    #[error("invalid chunk dimensions {x}x{y}x{z}: every axis must be positive")]
    InvalidChunkDimensions {
        /// Requested width.
        x: i32,
        /// Requested height.
        y: i32,
        /// Requested depth.
        z: i32,
    },

    /// The chunk count cannot form a grid at all.
    #[error("invalid chunk count {0}: at least one chunk is required")]
    InvalidChunkCount(i32),

    /// The chunk count has no integer square root.
    #[error("chunk count {count} is not a perfect square (nearest grid is {side}x{side})")]
    NonSquareChunkCount {
        /// Requested chunk count.
        count: usize,
        /// Side of the largest square grid that fits.
        side: usize,
    },

    /// A noise parameter (or a product of them) is NaN or infinite.
    #[error("noise parameter `{name}` is not finite: {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The chunk volume or the world extent does not fit the index types.
    #[error("world extent overflows: {0}")]
    ExtentOverflow(&'static str),

    /// The chunk block buffer could not be allocated.
    #[error("failed to allocate chunk buffer of {cells} cells")]
    AllocationFailed {
        /// Number of cells requested.
        cells: usize,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// `generate` was called on a generator that already ran.
    #[error("generation already started (generator is {state:?})")]
    AlreadyStarted {
        /// State the generator was in.
        state: GeneratorState,
    },

    /// Generation was cancelled between two chunks.
    #[error("generation cancelled after {completed} chunks")]
    Cancelled {
        /// Chunks fully flushed before the cancel was observed.
        completed: usize,
    },
}

impl From<rayon::ThreadPoolBuildError> for GenerationError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err.to_string())
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
