//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one full-height column of voxel data
//! at a position on the chunk grid, together with the mesh built from it.
//!
//! ## Coordinates
//!
//! - **Chunk position**: integer `(x, z)` on the chunk grid ([`ChunkPosition`]).
//! - **Local coordinate**: `[0, CHUNK_WIDTH) x [0, CHUNK_HEIGHT) x [0, CHUNK_WIDTH)`.
//! - **Global coordinate**: `local + (x * CHUNK_WIDTH, 0, z * CHUNK_WIDTH)`.
//!
//! There is exactly one chunk per `(x, z)`; the world is not split vertically, so
//! global and local Y are the same value. When drawn, a chunk is shifted down by
//! `CHUNK_HEIGHT` (see [`Chunk::render_origin`]); that offset never takes part in
//! voxel lookups.
//!
//! ## Lifecycle
//!
//! A chunk is created empty, filled once from a map function, meshed, and then drawn
//! every frame. Editing a voxel drops the mesh so it is rebuilt from scratch on the
//! next update.

use cgmath::{Point3, Vector3};

use crate::engine_state::{
    error::VoxelError,
    rendering::meshing::MeshBuffers,
    voxels::block::BlockId,
};

use chunk_iteration::ChunkBlockIterator;
use voxel_grid::VoxelGrid;

pub mod chunk_iteration;
pub mod voxel_grid;

/// The width and depth of a chunk in blocks.
pub const CHUNK_WIDTH: usize = 16;
/// The height of a chunk (and of the world) in blocks.
pub const CHUNK_HEIGHT: usize = 128;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT;
/// Largest chunk-grid coordinate, in either direction, on either axis.
///
/// Keeps every global voxel coordinate of a chunk, and of the voxels bordering
/// it, inside `i32`.
pub const MAX_CHUNK_COORDINATE: i32 = i32::MAX / CHUNK_WIDTH as i32 - 1;

const fn clamp_to_world(coordinate: i32) -> i32 {
    if coordinate > MAX_CHUNK_COORDINATE {
        MAX_CHUNK_COORDINATE
    } else if coordinate < -MAX_CHUNK_COORDINATE {
        -MAX_CHUNK_COORDINATE
    } else {
        coordinate
    }
}

/// A position on the chunk grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    /// Chunk-grid X.
    pub x: i32,
    /// Chunk-grid Z.
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a new chunk position.
    ///
    /// Coordinates past [`MAX_CHUNK_COORDINATE`] are clamped to the edge of the world.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkPosition {
            x: clamp_to_world(x),
            z: clamp_to_world(z),
        }
    }

    /// The chunk containing a global voxel coordinate.
    ///
    /// Uses floor division, so `-1` belongs to chunk `-1` rather than chunk `0`.
    #[inline]
    pub fn containing(global: Point3<i32>) -> Self {
        Self::new(
            global.x.div_euclid(CHUNK_WIDTH as i32),
            global.z.div_euclid(CHUNK_WIDTH as i32),
        )
    }

    /// The chunk containing a point in world space, e.g. the player's position.
    ///
    /// Points beyond the edge of the world map to the nearest edge chunk.
    pub fn containing_point(point: Point3<f32>) -> Self {
        Self::new(
            (point.x / CHUNK_WIDTH as f32).floor() as i32,
            (point.z / CHUNK_WIDTH as f32).floor() as i32,
        )
    }

    /// Global voxel coordinate of this chunk's local `(0, 0, 0)`.
    #[inline]
    pub fn voxel_origin(self) -> Point3<i32> {
        Point3::new(
            clamp_to_world(self.x) * CHUNK_WIDTH as i32,
            0,
            clamp_to_world(self.z) * CHUNK_WIDTH as i32,
        )
    }
}

/// Represents a `CHUNK_WIDTH x CHUNK_HEIGHT x CHUNK_WIDTH` column of voxel blocks.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkPosition,

    /// Dense block storage.
    voxels: VoxelGrid,

    /// The last mesh built from `voxels`, or `None` if it must be (re)built.
    mesh: Option<MeshBuffers>,
}

impl Chunk {
    /// Creates a new chunk filled with air and without a mesh.
    pub fn new(position: ChunkPosition) -> Self {
        Chunk {
            position,
            voxels: VoxelGrid::new(),
            mesh: None,
        }
    }

    /// Global voxel coordinate of local `(0, 0, 0)`.
    pub fn voxel_origin(&self) -> Point3<i32> {
        self.position.voxel_origin()
    }

    /// Translation to apply to this chunk's mesh when drawing it.
    pub fn render_origin(&self) -> Vector3<f32> {
        let origin = self.voxel_origin();
        Vector3::new(origin.x as f32, -(CHUNK_HEIGHT as f32), origin.z as f32)
    }

    /// Read access to the block storage.
    pub fn voxels(&self) -> &VoxelGrid {
        &self.voxels
    }

    /// Returns the block at a local coordinate.
    pub fn get_voxel(&self, x: usize, y: usize, z: usize) -> Result<BlockId, VoxelError> {
        self.voxels.get(x, y, z)
    }

    /// Sets the block at a local coordinate and invalidates the mesh.
    pub fn set_voxel(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        value: BlockId,
    ) -> Result<(), VoxelError> {
        self.voxels.set(x, y, z, value)?;
        self.mesh = None;
        Ok(())
    }

    /// Fills every voxel from `map_fn`, called with each voxel's global coordinate.
    pub fn fill<F>(&mut self, map_fn: F)
    where
        F: FnMut(Point3<i32>) -> BlockId,
    {
        self.voxels.fill(self.voxel_origin(), map_fn);
        self.mesh = None;
    }

    /// Iterates over the non-air voxels with their local positions.
    pub fn blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(&self.voxels)
    }

    /// The current mesh, if one has been built since the last edit.
    pub fn mesh(&self) -> Option<&MeshBuffers> {
        self.mesh.as_ref()
    }

    /// Drops the mesh so the chunk is rebuilt on the next update.
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
    }

    /// Stores a freshly built mesh.
    pub fn set_mesh(&mut self, mesh: MeshBuffers) {
        self.mesh = Some(mesh);
    }

    /// Whether the mesh is missing or stale.
    pub fn needs_mesh(&self) -> bool {
        self.mesh.is_none()
    }
}
