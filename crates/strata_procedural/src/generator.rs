//! # World Generator
//!
//! One-shot orchestrator for a whole terrain.
//!
//! ## Pipeline (per chunk, strictly sequential across chunks)
//!
//! ```text
//!   allocate buffer
//!        │
//!        ▼
//!   classify ── fork ──> [batch] [batch] ... [batch] ── join
//!        │
//!        ▼
//!   emit ────── fork ──> [slot]  [slot]  ... [slot]  ── join
//!        │
//!        ▼
//!   flush slots -> PlacementSink
//!        │
//!        ▼
//!   drop buffer
//! ```
//!
//! Both passes run on the generator's own bounded worker pool. The join
//! after classification is the barrier that orders every buffer write
//! before every emitter read.
//!
//! ## Lifecycle
//!
//! `Idle -> Running -> Stopped`. A generator runs once; a second call to
//! [`WorldGenerator::generate`] fails with
//! [`GenerationError::AlreadyStarted`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::block::ChunkBlockBuffer;
use crate::classifier::classify_chunk;
use crate::config::GenerationConfig;
use crate::emitter::emit_exposed;
use crate::error::{GenerationError, GenerationResult};
use crate::layout::{ChunkLayout, ChunkOffset};
use crate::noise::{SimplexNoise, WorldSeed};
use crate::placement::PlacementSink;
use crate::seed::{resolve_seed, SeedSource};

/// Lifecycle state of a [`WorldGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorState {
    /// Created, not started.
    Idle,
    /// Generation pass in progress.
    Running,
    /// Finished, failed or cancelled. Terminal.
    Stopped,
}

/// Execution settings. These change scheduling, never output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Worker threads for the parallel passes. `0` uses the number of
    /// available cores.
    pub worker_threads: usize,
    /// Full y-columns per parallel batch. Values below 1 are treated as 1.
    pub columns_per_batch: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            columns_per_batch: 4,
        }
    }
}

/// Cooperative cancellation flag, checked between chunks only.
///
/// A chunk that has started is always finished and flushed.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Outcome of one chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkReport {
    /// Index of the chunk.
    pub chunk_index: usize,
    /// World offset of the chunk.
    pub offset: ChunkOffset,
    /// Solid cells after classification.
    pub solid_blocks: usize,
    /// Placement requests sent to the sink.
    pub emitted: usize,
}

impl ChunkReport {
    /// Solid cells that were culled (fully buried).
    #[must_use]
    pub const fn culled(&self) -> usize {
        self.solid_blocks - self.emitted
    }
}

/// Summary of a finished generation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    /// Seed the noise was built from (never zero).
    pub seed: u64,
    /// Whether the seed was configured or drawn at startup.
    pub seed_source: SeedSource,
    /// Cells per chunk.
    pub cells_per_chunk: usize,
    /// Per-chunk outcomes, in generation order.
    pub chunks: Vec<ChunkReport>,
    /// Wall time of the whole pass.
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Number of chunks generated.
    #[must_use]
    pub fn chunks_generated(&self) -> usize {
        self.chunks.len()
    }

    /// Total cells classified.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells_per_chunk * self.chunks.len()
    }

    /// Total solid cells.
    #[must_use]
    pub fn solid_blocks(&self) -> usize {
        self.chunks.iter().map(|c| c.solid_blocks).sum()
    }

    /// Total placement requests sent to the sink.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.chunks.iter().map(|c| c.emitted).sum()
    }

    /// Total solid cells culled.
    #[must_use]
    pub fn culled(&self) -> usize {
        self.solid_blocks() - self.emitted()
    }
}

/// Drives classification and emission for every chunk of a world.
///
/// # Example
///
/// ```rust
/// use strata_procedural::{GenerationConfig, GeneratorOptions, PlacementRequest, WorldGenerator};
///
/// let config = GenerationConfig { chunk_count: 4, ..GenerationConfig::default() };
/// let generator = WorldGenerator::new(config, GeneratorOptions::default()).unwrap();
///
/// let mut placed: Vec<PlacementRequest> = Vec::new();
/// let report = generator.generate(&mut placed).unwrap();
/// assert_eq!(report.emitted(), placed.len());
/// ```
pub struct WorldGenerator {
    config: GenerationConfig,
    layout: ChunkLayout,
    options: GeneratorOptions,
    pool: ThreadPool,
    state: Mutex<GeneratorState>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for WorldGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldGenerator")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("options", &self.options)
            .field("workers", &self.pool.current_num_threads())
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl WorldGenerator {
    /// Validates the config and builds the worker pool.
    ///
    /// # Errors
    ///
    /// Returns the validation error for an invalid config (see
    /// [`GenerationConfig::validate`]) or [`GenerationError::ThreadPool`] if
    /// the workers cannot be spawned.
    pub fn new(config: GenerationConfig, options: GeneratorOptions) -> GenerationResult<Self> {
        let layout = config.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(options.worker_threads)
            .thread_name(|i| format!("strata-gen-{i}"))
            .build()?;

        Ok(Self {
            config,
            layout,
            options,
            pool,
            state: Mutex::new(GeneratorState::Idle),
            cancel: CancellationToken::new(),
        })
    }

    /// The config as supplied (seed not yet resolved).
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// The validated chunk layout.
    #[must_use]
    pub const fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> GeneratorState {
        *self.state.lock()
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Token that cancels this generator between chunks.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the generation pass, sending every placement to `sink`.
    ///
    /// Placements for a chunk are flushed after both of its passes finish and
    /// before the next chunk starts.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::AlreadyStarted`] if this generator already ran.
    /// - [`GenerationError::AllocationFailed`] if a chunk buffer cannot be
    ///   allocated; the run stops there.
    /// - [`GenerationError::Cancelled`] if the cancellation token fired.
    pub fn generate<S: PlacementSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> GenerationResult<GenerationReport> {
        self.begin()?;
        let result = self.run(sink);
        *self.state.lock() = GeneratorState::Stopped;
        result
    }

    fn begin(&self) -> GenerationResult<()> {
        let mut state = self.state.lock();
        match *state {
            GeneratorState::Idle => {
                *state = GeneratorState::Running;
                Ok(())
            }
            current => Err(GenerationError::AlreadyStarted { state: current }),
        }
    }

    fn run<S: PlacementSink + ?Sized>(&self, sink: &mut S) -> GenerationResult<GenerationReport> {
        let start = Instant::now();

        let (seed, seed_source) = resolve_seed(self.config.noise.seed);
        let config = self.config.with_seed(seed);
        let noise = SimplexNoise::new(WorldSeed::new(seed));

        let size = self.layout.size();
        let columns_per_batch = self.options.columns_per_batch.max(1);
        info!(
            seed,
            ?seed_source,
            chunks = self.layout.chunk_count(),
            size_x = size.x,
            size_y = size.y,
            size_z = size.z,
            workers = self.pool.current_num_threads(),
            "starting terrain generation"
        );

        let mut chunks = Vec::with_capacity(self.layout.chunk_count());
        for chunk_index in 0..self.layout.chunk_count() {
            if self.cancel.is_cancelled() {
                warn!(completed = chunk_index, "terrain generation cancelled");
                return Err(GenerationError::Cancelled {
                    completed: chunk_index,
                });
            }

            let offset = self.layout.offset(chunk_index);
            let mut buffer = ChunkBlockBuffer::allocate(size)?;

            self.pool.install(|| {
                classify_chunk(&noise, &config.noise, offset, columns_per_batch, &mut buffer);
            });
            let placements = self.pool.install(|| {
                emit_exposed(&buffer, offset, config.placement_prefab, columns_per_batch)
            });

            let solid_blocks = buffer.solid_count();
            let emitted = placements.flush_into(sink);
            drop(buffer);

            debug!(
                chunk_index,
                offset_x = offset.x,
                offset_z = offset.z,
                solid_blocks,
                emitted,
                "chunk generated"
            );
            chunks.push(ChunkReport {
                chunk_index,
                offset,
                solid_blocks,
                emitted,
            });
        }

        let report = GenerationReport {
            seed,
            seed_source,
            cells_per_chunk: size.volume(),
            chunks,
            elapsed: start.elapsed(),
        };
        info!(
            chunks = report.chunks_generated(),
            solid = report.solid_blocks(),
            emitted = report.emitted(),
            culled = report.culled(),
            elapsed = ?report.elapsed,
            "terrain generation finished"
        );
        Ok(report)
    }
}
