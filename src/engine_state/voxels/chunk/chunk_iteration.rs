//! # Chunk Iteration Module
//!
//! This module provides an iterator over the non-air voxels of a chunk.
//!
//! The mesher only does work for solid voxels, so skipping air here keeps the
//! per-voxel loop free of the emptiness check. Iteration follows the storage
//! order of [`VoxelGrid`], so consecutive items are usually neighbors in memory.

use cgmath::Point3;

use crate::engine_state::voxels::block::{BlockId, AIR};

use super::voxel_grid::VoxelGrid;

/// An iterator over all non-air voxels in a chunk.
///
/// Yields the local position of each voxel together with its block ID.
pub struct ChunkBlockIterator<'a> {
    /// Storage being walked
    voxels: &'a [BlockId],
    /// Next linear index to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first voxel.
    pub fn new(grid: &'a VoxelGrid) -> Self {
        ChunkBlockIterator {
            voxels: grid.as_slice(),
            current_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_offset < self.voxels.len() {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block = self.voxels[offset];
            if block != AIR {
                return VoxelGrid::decode(offset).map(|position| (position, block));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.voxels.len() - self.current_offset))
    }
}
