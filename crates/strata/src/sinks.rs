//! # Placement Sinks
//!
//! Ready-made receivers for generation output.
//!
//! - [`CountingSink`]: tallies requests and the world-space bounds they cover
//! - [`SharedSink`]: collects requests behind a lock so another thread can
//!   drain them while generation runs

use std::sync::Arc;

use parking_lot::Mutex;
use strata_procedural::{BlockPos, PlacementRequest, PlacementSink};

/// Inclusive world-space box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest coordinate on every axis.
    pub min: BlockPos,
    /// Largest coordinate on every axis.
    pub max: BlockPos,
}

impl Bounds {
    fn point(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    fn include(&mut self, pos: BlockPos) {
        self.min = BlockPos::new(
            self.min.x.min(pos.x),
            self.min.y.min(pos.y),
            self.min.z.min(pos.z),
        );
        self.max = BlockPos::new(
            self.max.x.max(pos.x),
            self.max.y.max(pos.y),
            self.max.z.max(pos.z),
        );
    }
}

/// Counts placements without keeping them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingSink {
    placed: usize,
    bounds: Option<Bounds>,
}

impl CountingSink {
    /// Creates an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests received.
    #[inline]
    #[must_use]
    pub const fn placed(&self) -> usize {
        self.placed
    }

    /// Bounds of every received position, `None` before the first one.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl PlacementSink for CountingSink {
    fn place(&mut self, request: PlacementRequest) {
        let pos = request.world_position;
        self.placed += 1;
        self.bounds = Some(match self.bounds {
            Some(mut bounds) => {
                bounds.include(pos);
                bounds
            }
            None => Bounds::point(pos),
        });
    }
}

/// Thread-safe collector. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct SharedSink {
    inner: Arc<Mutex<Vec<PlacementRequest>>>,
}

impl SharedSink {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests waiting to be drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Takes everything received so far, in arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<PlacementRequest> {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl PlacementSink for SharedSink {
    fn place(&mut self, request: PlacementRequest) {
        self.inner.lock().push(request);
    }
}
