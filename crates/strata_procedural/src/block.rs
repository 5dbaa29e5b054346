//! # Chunk Block Buffer
//!
//! Dense per-chunk storage of block classifications.
//!
//! ## Lifecycle
//!
//! 1. Allocated fresh right before classification (all cells `Empty`)
//! 2. Fully written by the classifier
//! 3. Read-only while the emitter runs
//! 4. Dropped as soon as the chunk's placements are flushed
//!
//! Buffers are never shared across chunks and never retained.

use crate::error::{GenerationError, GenerationResult};
use crate::layout::{linear_index, ChunkSize, LocalPos};

/// Classification of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    /// Below the terrain surface.
    Solid,
    /// Above the terrain surface.
    #[default]
    Empty,
}

impl BlockType {
    /// Returns true for [`BlockType::Solid`].
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }
}

/// A chunk's block grid, indexed by [`linear_index`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBlockBuffer {
    size: ChunkSize,
    blocks: Vec<BlockType>,
}

impl ChunkBlockBuffer {
    /// Allocates a buffer of `size.volume()` cells, all `Empty`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidChunkDimensions`] if an axis is zero
    /// and [`GenerationError::AllocationFailed`] if the memory cannot be
    /// reserved.
    pub fn allocate(size: ChunkSize) -> GenerationResult<Self> {
        Self::filled(size, BlockType::Empty)
    }

    /// Allocates a buffer with every cell set to `block`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidChunkDimensions`] if an axis is
    /// zero, since a degenerate chunk has no neighbors to cull against.
    /// Returns [`GenerationError::AllocationFailed`] if the volume overflows
    /// or the memory cannot be reserved.
    pub fn filled(size: ChunkSize, block: BlockType) -> GenerationResult<Self> {
        if size.x == 0 || size.y == 0 || size.z == 0 {
            let axis = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
            return Err(GenerationError::InvalidChunkDimensions {
                x: axis(size.x),
                y: axis(size.y),
                z: axis(size.z),
            });
        }

        let cells = size
            .checked_volume()
            .ok_or(GenerationError::AllocationFailed { cells: usize::MAX })?;

        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(cells)
            .map_err(|_| GenerationError::AllocationFailed { cells })?;
        blocks.resize(cells, block);

        Ok(Self { size, blocks })
    }

    /// Chunk dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> ChunkSize {
        self.size
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the buffer has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Gets the block at a local position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the chunk.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: LocalPos) -> BlockType {
        assert!(self.size.contains(pos), "{pos:?} outside chunk {:?}", self.size);
        self.blocks[linear_index(pos, self.size)]
    }

    /// Sets the block at a local position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the chunk.
    #[inline]
    pub fn set(&mut self, pos: LocalPos, block: BlockType) {
        assert!(self.size.contains(pos), "{pos:?} outside chunk {:?}", self.size);
        let index = linear_index(pos, self.size);
        self.blocks[index] = block;
    }

    /// All cells in index order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Mutable access for the classifier's parallel writes.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [BlockType] {
        &mut self.blocks
    }

    /// Number of `Solid` cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }
}
