//! # Placement Requests
//!
//! The generator decides *what* to place in parallel; the sink does the
//! actual placing, sequentially, outside this crate.
//!
//! ```text
//!   batch 0 ──> [slot 0] ─┐
//!   batch 1 ──> [slot 1] ─┼──> flush (slot order) ──> PlacementSink
//!   batch N ──> [slot N] ─┘
//! ```

use crate::config::PrefabHandle;
use crate::layout::BlockPos;

/// Instruction to instantiate one object at an integer world position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementRequest {
    /// World position of the block.
    pub world_position: BlockPos,
    /// Handle forwarded unchanged from the config.
    pub prefab: PrefabHandle,
}

impl PlacementRequest {
    /// Creates a placement request.
    #[inline]
    #[must_use]
    pub const fn new(world_position: BlockPos, prefab: PrefabHandle) -> Self {
        Self {
            world_position,
            prefab,
        }
    }
}

/// Receiver of placement requests (the engine's instantiation side).
///
/// Called exactly once per exposed solid block, after that block's chunk has
/// finished both passes. Scale and rotation are left to the sink.
pub trait PlacementSink {
    /// Places one object.
    fn place(&mut self, request: PlacementRequest);
}

impl PlacementSink for Vec<PlacementRequest> {
    fn place(&mut self, request: PlacementRequest) {
        self.push(request);
    }
}

impl<S: PlacementSink + ?Sized> PlacementSink for &mut S {
    fn place(&mut self, request: PlacementRequest) {
        (**self).place(request);
    }
}

impl<S: PlacementSink + ?Sized> PlacementSink for Box<S> {
    fn place(&mut self, request: PlacementRequest) {
        (**self).place(request);
    }
}

/// Output of one emission pass: one slot per batch, in batch order.
///
/// Each batch writes only its own slot, so no two workers ever touch the
/// same output. Iteration order is ascending buffer index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmittedPlacements {
    slots: Vec<Vec<PlacementRequest>>,
}

impl EmittedPlacements {
    /// Wraps per-batch slots (already in batch order).
    #[must_use]
    pub(crate) fn from_slots(slots: Vec<Vec<PlacementRequest>>) -> Self {
        Self { slots }
    }

    /// Total number of requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// Returns true if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Number of batch slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates requests in buffer-index order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacementRequest> + '_ {
        self.slots.iter().flatten()
    }

    /// Hands every request to `sink`, in order. Returns how many were sent.
    pub fn flush_into<S: PlacementSink + ?Sized>(self, sink: &mut S) -> usize {
        let mut sent = 0;
        for request in self.slots.into_iter().flatten() {
            sink.place(request);
            sent += 1;
        }
        sent
    }

    /// Collects every request into one vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlacementRequest> {
        self.slots.into_iter().flatten().collect()
    }
}
