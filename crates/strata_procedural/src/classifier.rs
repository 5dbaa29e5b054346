//! # Chunk Block Classifier
//!
//! Fills a chunk buffer with `Solid` / `Empty` cells from a noise height
//! field.
//!
//! ## Height Function
//!
//! ```text
//! raw     = noise(wx * frequency, wz * frequency)          in [-1, 1]
//! mapped  = remap(raw, [-1, 1] -> [remap_min, remap_max])
//! height  = clamp(trunc(mapped * amplitude * (sy - 1)), 0, sy)
//! cell    = Solid if y < height else Empty
//! ```
//!
//! The height depends only on the world column `(wx, wz)`, so the pass is
//! split into batches of whole y-columns. Batches write disjoint slices of
//! the buffer and share nothing else.

use rayon::prelude::*;

use crate::block::{BlockType, ChunkBlockBuffer};
use crate::config::NoiseSettings;
use crate::layout::{position_from_index, ChunkOffset};
use crate::noise::Noise2D;

/// Linearly maps `value` from `[from_min, from_max]` to `[to_min, to_max]`.
#[inline]
#[must_use]
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    to_min + (value - from_min) * (to_max - to_min) / (from_max - from_min)
}

/// Terrain height of the world column `(wx, wz)`, in `[0, column_height]`.
///
/// `column_height` is the chunk's `sy` and must be at least 1.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn terrain_height<N: Noise2D + ?Sized>(
    noise: &N,
    settings: &NoiseSettings,
    column_height: usize,
    wx: i32,
    wz: i32,
) -> usize {
    let raw = noise.sample(
        f64::from(wx) * settings.frequency,
        f64::from(wz) * settings.frequency,
    );
    let mapped = remap(raw, -1.0, 1.0, settings.remap_min, settings.remap_max);
    let height = (mapped * settings.amplitude * (column_height - 1) as f64).trunc();

    // NaN never reaches here (config validation), but it would clamp to 0.
    height.clamp(0.0, column_height as f64) as usize
}

/// Classifies every cell of `buffer` for the chunk at `offset`.
///
/// Runs on the current rayon pool (callers `install` their own pool) in
/// batches of `columns_per_batch` full columns. Returns once every batch has
/// finished writing.
pub fn classify_chunk<N: Noise2D + ?Sized>(
    noise: &N,
    settings: &NoiseSettings,
    offset: ChunkOffset,
    columns_per_batch: usize,
    buffer: &mut ChunkBlockBuffer,
) {
    let size = buffer.size();
    // Saturate: an oversized batch is just one batch covering the chunk.
    let batch_len = size.y.saturating_mul(columns_per_batch.max(1));

    buffer
        .as_mut_slice()
        .par_chunks_mut(batch_len)
        .enumerate()
        .for_each(|(batch, cells)| {
            let start = batch * batch_len;
            for (column, column_cells) in cells.chunks_mut(size.y).enumerate() {
                let base = position_from_index(start + column * size.y, size);
                let world = base.to_world(offset);
                let height = terrain_height(noise, settings, size.y, world.x, world.z);

                for (y, cell) in column_cells.iter_mut().enumerate() {
                    *cell = if y < height {
                        BlockType::Solid
                    } else {
                        BlockType::Empty
                    };
                }
            }
        });
}
