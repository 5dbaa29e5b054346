//! # Chunk Layout Math
//!
//! Maps 3D block positions to the linear index of a chunk buffer and back,
//! and places chunks on a square grid in world space.
//!
//! ## Buffer Layout
//!
//! ```text
//! index = x * (sy * sz) + z * sy + y
//! ```
//!
//! `y` is the fastest-moving axis, so every run of `sy` consecutive indices
//! starting at a multiple of `sy` is one vertical column. The classifier
//! relies on this to batch whole columns.
//!
//! ## World Grid
//!
//! Chunk `i` of `n` sits at grid cell `(i / s, i % s)` with
//! `s = floor(sqrt(n))`, offset by whole chunk widths on x and z. Chunks are
//! never stacked vertically.

use crate::error::{GenerationError, GenerationResult};

/// Validated chunk dimensions (every axis is at least 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkSize {
    /// Width (x axis).
    pub x: usize,
    /// Height (y axis, vertical).
    pub y: usize,
    /// Depth (z axis).
    pub z: usize,
}

impl ChunkSize {
    /// Creates a chunk size. Callers are expected to pass positive axes;
    /// [`ChunkLayout::new`] enforces it for generation.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Number of cells in one chunk, or `None` on overflow.
    #[inline]
    #[must_use]
    pub const fn checked_volume(self) -> Option<usize> {
        match self.x.checked_mul(self.y) {
            Some(xy) => xy.checked_mul(self.z),
            None => None,
        }
    }

    /// Number of cells in one chunk.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.x * self.y * self.z
    }

    /// Returns true if `pos` lies inside the chunk.
    #[inline]
    #[must_use]
    pub const fn contains(self, pos: LocalPos) -> bool {
        pos.x < self.x && pos.y < self.y && pos.z < self.z
    }
}

/// Block position local to one chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Local X.
    pub x: usize,
    /// Local Y (height).
    pub y: usize,
    /// Local Z.
    pub z: usize,
}

impl LocalPos {
    /// Creates a local position.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Returns true if the position touches a chunk face on any axis.
    #[inline]
    #[must_use]
    pub const fn is_on_boundary(self, size: ChunkSize) -> bool {
        self.x == 0
            || self.x == size.x - 1
            || self.y == 0
            || self.y == size.y - 1
            || self.z == 0
            || self.z == size.z - 1
    }

    /// Converts to a world position using the chunk's horizontal offset.
    ///
    /// The chunk layout validates that every world coordinate fits in `i32`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn to_world(self, offset: ChunkOffset) -> BlockPos {
        BlockPos {
            x: self.x as i32 + offset.x,
            y: self.y as i32,
            z: self.z as i32 + offset.z,
        }
    }
}

/// Integer block position in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    /// World X.
    pub x: i32,
    /// World Y (height).
    pub y: i32,
    /// World Z.
    pub z: i32,
}

impl BlockPos {
    /// Creates a world position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Horizontal world offset of a chunk's origin corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkOffset {
    /// World X of local x = 0.
    pub x: i32,
    /// World Z of local z = 0.
    pub z: i32,
}

impl ChunkOffset {
    /// Creates a chunk offset.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Linear buffer index of a local position.
#[inline]
#[must_use]
pub const fn linear_index(pos: LocalPos, size: ChunkSize) -> usize {
    pos.x * (size.y * size.z) + pos.z * size.y + pos.y
}

/// Local position of a linear buffer index. Exact inverse of [`linear_index`].
#[inline]
#[must_use]
pub const fn position_from_index(index: usize, size: ChunkSize) -> LocalPos {
    LocalPos {
        x: index / (size.y * size.z),
        y: index % size.y,
        z: (index / size.y) % size.z,
    }
}

/// Side of the largest square grid that fits `chunk_count` chunks
/// (`floor(sqrt(chunk_count))`).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn grid_side(chunk_count: usize) -> usize {
    let mut side = (chunk_count as f64).sqrt() as usize;
    // Float sqrt can be off by one for large inputs.
    while side > 0 && side.saturating_mul(side) > chunk_count {
        side -= 1;
    }
    while (side + 1).saturating_mul(side + 1) <= chunk_count {
        side += 1;
    }
    side
}

/// World offset of chunk `chunk_index` on a grid with `side` chunks per row.
///
/// `side` must be non-zero. For non-square chunk counts the grid is only
/// partially covered; [`ChunkLayout`] rejects those counts up front.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn chunk_offset(chunk_index: usize, size: ChunkSize, side: usize) -> ChunkOffset {
    ChunkOffset {
        x: ((chunk_index / side) * size.x) as i32,
        z: ((chunk_index % side) * size.z) as i32,
    }
}

/// Validated chunk grid: sizes, count and grid side that are safe to index
/// with and whose world coordinates fit in `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkLayout {
    size: ChunkSize,
    chunk_count: usize,
    side: usize,
}

impl ChunkLayout {
    /// Validates a chunk size and count.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::NonSquareChunkCount`] if `chunk_count` has no
    ///   integer square root.
    /// - [`GenerationError::ExtentOverflow`] if the chunk volume or any world
    ///   coordinate would overflow.
    pub fn new(size: ChunkSize, chunk_count: usize) -> GenerationResult<Self> {
        let side = grid_side(chunk_count);
        if side == 0 || side * side != chunk_count {
            return Err(GenerationError::NonSquareChunkCount {
                count: chunk_count,
                side,
            });
        }

        size.checked_volume()
            .ok_or(GenerationError::ExtentOverflow("chunk volume exceeds usize"))?;

        let limit = i32::MAX as usize;
        let extent_x = side.checked_mul(size.x);
        let extent_z = side.checked_mul(size.z);
        match (extent_x, extent_z) {
            (Some(ex), Some(ez)) if ex <= limit && ez <= limit && size.y <= limit => {}
            _ => return Err(GenerationError::ExtentOverflow("world coordinates exceed i32")),
        }

        Ok(Self {
            size,
            chunk_count,
            side,
        })
    }

    /// Chunk dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> ChunkSize {
        self.size
    }

    /// Number of chunks to generate.
    #[inline]
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Chunks per grid row.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// World offset of a chunk.
    #[inline]
    #[must_use]
    pub const fn offset(&self, chunk_index: usize) -> ChunkOffset {
        chunk_offset(chunk_index, self.size, self.side)
    }
}
