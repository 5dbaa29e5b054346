//! # Voxel Emitter
//!
//! Culls buried blocks and emits a placement request for every solid block
//! whose surface could be seen.
//!
//! ## Exposure Rule
//!
//! A solid block is exposed if it lies on any face of the chunk, or if any
//! of its six axis neighbors inside the chunk is empty.
//!
//! The face test always runs first. Only interior blocks reach the neighbor
//! lookups, and an interior block's neighbors are all inside the chunk, so
//! no neighbor index is ever computed out of range. Do not reorder.

use rayon::prelude::*;

use crate::block::{BlockType, ChunkBlockBuffer};
use crate::config::PrefabHandle;
use crate::layout::{position_from_index, ChunkOffset, LocalPos};
use crate::placement::{EmittedPlacements, PlacementRequest};

/// Returns true if the block at `pos` has a visible face.
///
/// Does not look at the block itself; callers check it is solid.
#[must_use]
pub fn is_exposed(buffer: &ChunkBlockBuffer, pos: LocalPos) -> bool {
    if pos.is_on_boundary(buffer.size()) {
        return true;
    }

    let LocalPos { x, y, z } = pos;
    let neighbors = [
        LocalPos::new(x + 1, y, z),
        LocalPos::new(x - 1, y, z),
        LocalPos::new(x, y + 1, z),
        LocalPos::new(x, y - 1, z),
        LocalPos::new(x, y, z + 1),
        LocalPos::new(x, y, z - 1),
    ];
    neighbors
        .iter()
        .any(|&neighbor| buffer.get(neighbor) == BlockType::Empty)
}

/// Emits a request for every exposed solid block of a classified chunk.
///
/// Runs on the current rayon pool in batches of `columns_per_batch` full
/// columns. Each batch fills its own output slot; the result lists requests
/// in ascending buffer index regardless of how batches were scheduled.
#[must_use]
pub fn emit_exposed(
    buffer: &ChunkBlockBuffer,
    offset: ChunkOffset,
    prefab: PrefabHandle,
    columns_per_batch: usize,
) -> EmittedPlacements {
    let size = buffer.size();
    // Saturate: an oversized batch is just one batch covering the chunk.
    let batch_len = size.y.saturating_mul(columns_per_batch.max(1));

    let slots: Vec<Vec<PlacementRequest>> = buffer
        .as_slice()
        .par_chunks(batch_len)
        .enumerate()
        .map(|(batch, cells)| {
            let start = batch * batch_len;
            cells
                .iter()
                .enumerate()
                .filter(|(_, block)| block.is_solid())
                .filter_map(|(i, _)| {
                    let pos = position_from_index(start + i, size);
                    is_exposed(buffer, pos)
                        .then(|| PlacementRequest::new(pos.to_world(offset), prefab))
                })
                .collect::<Vec<_>>()
        })
        .collect();

    EmittedPlacements::from_slots(slots)
}
