//! # Voxel Grid Module
//!
//! Dense block storage for a single chunk.
//!
//! Every position in the `CHUNK_WIDTH x CHUNK_HEIGHT x CHUNK_WIDTH` column holds one
//! [`BlockId`], laid out x-fastest, then y, then z:
//!
//! ```text
//! index = x + CHUNK_WIDTH * (y + CHUNK_HEIGHT * z)
//! ```
//!
//! Walking x then y keeps a vertical slice contiguous, which matches the order the
//! mesher reads neighbors in.
//!
//! All accessors are bounds checked and return [`VoxelError::OutOfRange`] instead of
//! touching a neighboring cell.

use cgmath::Point3;

use crate::engine_state::{error::VoxelError, voxels::block::{BlockId, AIR}};

use super::{CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};

/// Fixed-size 3D array of block IDs backing one chunk.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    voxels: Box<[BlockId]>,
}

impl VoxelGrid {
    /// Creates a grid filled with air.
    pub fn new() -> Self {
        VoxelGrid {
            voxels: vec![AIR; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Maps a local coordinate to its linear index.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `x` or `z` is not below `CHUNK_WIDTH` or `y` is not below
    /// `CHUNK_HEIGHT`.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> Result<usize, VoxelError> {
        if x >= CHUNK_WIDTH || y >= CHUNK_HEIGHT || z >= CHUNK_WIDTH {
            return Err(VoxelError::OutOfRange {
                x: x as i64,
                y: y as i64,
                z: z as i64,
            });
        }
        Ok(x + CHUNK_WIDTH * (y + CHUNK_HEIGHT * z))
    }

    /// Inverse of [`VoxelGrid::index`]. Returns `None` past the end of the grid.
    #[inline]
    pub fn decode(index: usize) -> Option<Point3<usize>> {
        if index >= CHUNK_VOLUME {
            return None;
        }
        let x = index % CHUNK_WIDTH;
        let y = (index / CHUNK_WIDTH) % CHUNK_HEIGHT;
        let z = index / (CHUNK_WIDTH * CHUNK_HEIGHT);
        Some(Point3::new(x, y, z))
    }

    /// Returns the block stored at a local coordinate.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<BlockId, VoxelError> {
        Ok(self.voxels[Self::index(x, y, z)?])
    }

    /// Overwrites the block stored at a local coordinate.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: BlockId) -> Result<(), VoxelError> {
        self.voxels[Self::index(x, y, z)?] = value;
        Ok(())
    }

    /// Sets every voxel from a map function evaluated at its global coordinate.
    ///
    /// `origin` is the global coordinate of local `(0, 0, 0)`. Voxels are visited
    /// x-outermost, then y, then z.
    pub fn fill<F>(&mut self, origin: Point3<i32>, mut map_fn: F)
    where
        F: FnMut(Point3<i32>) -> BlockId,
    {
        for x in 0..CHUNK_WIDTH {
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_WIDTH {
                    let global = Point3::new(
                        origin.x + x as i32,
                        origin.y + y as i32,
                        origin.z + z as i32,
                    );
                    self.voxels[x + CHUNK_WIDTH * (y + CHUNK_HEIGHT * z)] = map_fn(global);
                }
            }
        }
    }

    /// Raw view of the storage in index order.
    pub fn as_slice(&self) -> &[BlockId] {
        &self.voxels
    }

    /// Number of voxels that are not air.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|id| **id != AIR).count()
    }
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("solid_count", &self.solid_count())
            .finish()
    }
}
