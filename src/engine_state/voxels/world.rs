//! # World Module
//!
//! This module provides the `ChunkDirectory` struct which manages the collection of
//! chunks in the voxel world and answers voxel queries in global coordinates.
//!
//! ## Architecture
//!
//! The directory is sparse: only chunks that have been added are kept in memory.
//! Chunks live in a growable list, and a hash map from [`ChunkPosition`] to list
//! index gives O(1) existence checks and lookups. Each position maps to exactly
//! one chunk; adding a position twice leaves the first chunk in place.
//!
//! ## Unloaded Space
//!
//! Looking up a voxel in a chunk that is not loaded, or above or below the world,
//! returns `None`. Callers treat `None` like air, so the edge of the loaded area
//! still gets faces instead of leaving holes in the world.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - [`ChunkDirectory::load_chunks_around_player`] creates every missing chunk in its
//!   radius in one synchronous call, so its cost grows with the number of new chunks.
//!   Once the area is loaded, repeated calls do nothing.
//! - Chunks are never evicted

use std::collections::HashMap;

use cgmath::Point3;
use log::trace;

use crate::engine_state::{error::VoxelError, voxels::block::BlockId};

use super::chunk::{Chunk, ChunkPosition, CHUNK_HEIGHT, CHUNK_WIDTH, MAX_CHUNK_COORDINATE};

/// Default number of chunks loaded in each direction around the player.
pub const DEFAULT_LOAD_RADIUS: i32 = 5;

/// Sparse directory of loaded chunks keyed by chunk-grid position.
#[derive(Debug, Default)]
pub struct ChunkDirectory {
    /// Loaded chunks, in the order they were added.
    chunks: Vec<Chunk>,
    /// Index into `chunks` for every loaded position.
    chunk_reference: HashMap<ChunkPosition, usize>,
}

impl ChunkDirectory {
    /// Creates a new, empty directory.
    pub fn new() -> Self {
        ChunkDirectory {
            chunks: Vec::new(),
            chunk_reference: HashMap::new(),
        }
    }

    /// Adds an empty chunk at `position` if one doesn't already exist.
    ///
    /// Returns the chunk at `position`, new or existing. An existing chunk is
    /// left untouched.
    pub fn add_chunk(&mut self, position: ChunkPosition) -> &mut Chunk {
        let index = match self.chunk_reference.get(&position) {
            Some(index) => {
                trace!("chunk {:?} already loaded", position);
                *index
            }
            None => {
                self.chunks.push(Chunk::new(position));
                let index = self.chunks.len() - 1;
                self.chunk_reference.insert(position, index);
                index
            }
        };
        &mut self.chunks[index]
    }

    /// Whether a chunk is loaded at `position`.
    pub fn chunk_exists(&self, position: ChunkPosition) -> bool {
        self.chunk_reference.contains_key(&position)
    }

    /// Retrieves the chunk at `position`, if loaded.
    pub fn get_chunk(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.chunk_reference
            .get(&position)
            .map(|index| &self.chunks[*index])
    }

    /// Retrieves the chunk at `position` for modification, if loaded.
    pub fn get_chunk_mut(&mut self, position: ChunkPosition) -> Option<&mut Chunk> {
        match self.chunk_reference.get(&position) {
            Some(index) => Some(&mut self.chunks[*index]),
            None => None,
        }
    }

    /// Iterates over all loaded chunks in the order they were added.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Splits a global coordinate into the owning chunk and the local coordinate
    /// inside it. Returns `None` if the coordinate is outside the world: Y outside
    /// `[0, CHUNK_HEIGHT)`, or X/Z past the edge chunks.
    pub fn local_position_of(global: Point3<i32>) -> Option<(ChunkPosition, Point3<usize>)> {
        if global.y < 0 || global.y >= CHUNK_HEIGHT as i32 {
            return None;
        }
        let chunk_position = ChunkPosition::containing(global);
        let origin = chunk_position.voxel_origin();
        let to_local = |offset: i32| {
            usize::try_from(offset)
                .ok()
                .filter(|local| *local < CHUNK_WIDTH)
        };
        let local = Point3::new(
            to_local(global.x - origin.x)?,
            global.y as usize,
            to_local(global.z - origin.z)?,
        );
        Some((chunk_position, local))
    }

    /// Gets the block at a global coordinate.
    ///
    /// Returns `None` if the owning chunk is not loaded or Y is outside
    /// `[0, CHUNK_HEIGHT)`.
    pub fn get_voxel(&self, global: Point3<i32>) -> Option<BlockId> {
        let (chunk_position, local) = Self::local_position_of(global)?;
        self.get_chunk(chunk_position)?
            .get_voxel(local.x, local.y, local.z)
            .ok()
    }

    /// Sets the block at a global coordinate.
    ///
    /// Returns `Ok(false)` without writing if the owning chunk is not loaded. The
    /// owning chunk's mesh is dropped so it gets rebuilt, and so is the mesh of any
    /// loaded chunk across an edge the voxel touches.
    ///
    /// # Errors
    /// `OutOfRange` if Y is outside `[0, CHUNK_HEIGHT)` or X/Z is past the edge chunks.
    pub fn set_voxel(&mut self, global: Point3<i32>, value: BlockId) -> Result<bool, VoxelError> {
        let (chunk_position, local) =
            Self::local_position_of(global).ok_or(VoxelError::OutOfRange {
                x: global.x as i64,
                y: global.y as i64,
                z: global.z as i64,
            })?;
        let Some(chunk) = self.get_chunk_mut(chunk_position) else {
            return Ok(false);
        };
        chunk.set_voxel(local.x, local.y, local.z, value)?;

        // Faces across a chunk edge are culled against this voxel too
        let last = CHUNK_WIDTH - 1;
        let edges = [
            (local.x == 0, -1, 0),
            (local.x == last, 1, 0),
            (local.z == 0, 0, -1),
            (local.z == last, 0, 1),
        ];
        for (_, dx, dz) in edges.into_iter().filter(|(touched, _, _)| *touched) {
            let neighbor = ChunkPosition::new(chunk_position.x + dx, chunk_position.z + dz);
            if neighbor == chunk_position {
                continue;
            }
            if let Some(chunk) = self.get_chunk_mut(neighbor) {
                chunk.clear_mesh();
            }
        }
        Ok(true)
    }

    /// Adds every missing chunk within `radius` chunks of the player.
    ///
    /// Covers the square `[-radius, radius]^2` around the chunk containing `player`,
    /// cut off at the edge of the world. New chunks are empty; the caller fills them.
    ///
    /// # Returns
    /// The positions of the chunks that were added by this call.
    pub fn load_chunks_around_player(
        &mut self,
        player: Point3<f32>,
        radius: i32,
    ) -> Vec<ChunkPosition> {
        let center = ChunkPosition::containing_point(player);
        let radius = radius.max(0);
        let span = |middle: i32| {
            middle.saturating_sub(radius).max(-MAX_CHUNK_COORDINATE)
                ..=middle.saturating_add(radius).min(MAX_CHUNK_COORDINATE)
        };
        let mut added = Vec::new();

        for x in span(center.x) {
            for z in span(center.z) {
                let position = ChunkPosition::new(x, z);
                if !self.chunk_exists(position) {
                    self.add_chunk(position);
                    added.push(position);
                }
            }
        }

        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::meshing::MeshBuffers;

    #[test]
    fn add_chunk_is_idempotent() {
        let mut directory = ChunkDirectory::new();
        directory
            .add_chunk(ChunkPosition::new(3, -2))
            .set_voxel(0, 0, 0, 5)
            .unwrap();
        directory.add_chunk(ChunkPosition::new(3, -2));

        assert_eq!(directory.len(), 1);
        let chunk = directory.get_chunk(ChunkPosition::new(3, -2)).unwrap();
        assert_eq!(chunk.get_voxel(0, 0, 0).unwrap(), 5);
    }

    #[test]
    fn missing_chunks_are_absent() {
        let directory = ChunkDirectory::new();
        assert!(!directory.chunk_exists(ChunkPosition::new(0, 0)));
        assert!(directory.get_chunk(ChunkPosition::new(0, 0)).is_none());
        assert_eq!(directory.get_voxel(Point3::new(0, 0, 0)), None);
    }

    #[test]
    fn negative_coordinates_resolve_with_floor_division() {
        let mut directory = ChunkDirectory::new();
        directory
            .add_chunk(ChunkPosition::new(-1, 0))
            .set_voxel(15, 10, 0, 4)
            .unwrap();
        directory.add_chunk(ChunkPosition::new(0, 0));

        assert_eq!(directory.get_voxel(Point3::new(-1, 10, 0)), Some(4));
        assert_eq!(directory.get_voxel(Point3::new(0, 10, 0)), Some(0));
        assert_eq!(
            ChunkDirectory::local_position_of(Point3::new(-1, 10, -17)),
            Some((ChunkPosition::new(-1, -2), Point3::new(15, 10, 15)))
        );
    }

    #[test]
    fn y_outside_the_world_is_absent() {
        let mut directory = ChunkDirectory::new();
        directory.add_chunk(ChunkPosition::new(0, 0));
        assert_eq!(directory.get_voxel(Point3::new(0, -1, 0)), None);
        assert_eq!(directory.get_voxel(Point3::new(0, CHUNK_HEIGHT as i32, 0)), None);
        assert_eq!(directory.get_voxel(Point3::new(0, CHUNK_HEIGHT as i32 - 1, 0)), Some(0));
    }

    #[test]
    fn set_voxel_writes_through() {
        let mut directory = ChunkDirectory::new();
        directory.add_chunk(ChunkPosition::new(1, 1));

        assert!(directory.set_voxel(Point3::new(20, 3, 31), 2).unwrap());
        assert_eq!(directory.get_voxel(Point3::new(20, 3, 31)), Some(2));
        assert!(!directory.set_voxel(Point3::new(-20, 3, 31), 2).unwrap());
        assert!(matches!(
            directory.set_voxel(Point3::new(20, -3, 31), 2),
            Err(VoxelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn corner_edits_invalidate_both_neighbors() {
        let mut directory = ChunkDirectory::new();
        for (x, z) in [(0, 0), (-1, 0), (0, -1), (1, 0), (-1, -1)] {
            directory
                .add_chunk(ChunkPosition::new(x, z))
                .set_mesh(MeshBuffers::new());
        }

        assert!(directory.set_voxel(Point3::new(0, 7, 0), 1).unwrap());
        let needs_mesh = |x, z| {
            directory
                .get_chunk(ChunkPosition::new(x, z))
                .unwrap()
                .needs_mesh()
        };
        assert!(needs_mesh(0, 0));
        assert!(needs_mesh(-1, 0));
        assert!(needs_mesh(0, -1));
        assert!(!needs_mesh(1, 0));
        assert!(!needs_mesh(-1, -1));
    }

    #[test]
    fn interior_edits_leave_neighbors_alone() {
        let mut directory = ChunkDirectory::new();
        for (x, z) in [(0, 0), (-1, 0), (1, 0)] {
            directory
                .add_chunk(ChunkPosition::new(x, z))
                .set_mesh(MeshBuffers::new());
        }

        assert!(directory.set_voxel(Point3::new(5, 7, 9), 1).unwrap());
        assert!(directory.get_chunk(ChunkPosition::new(0, 0)).unwrap().needs_mesh());
        assert!(!directory.get_chunk(ChunkPosition::new(-1, 0)).unwrap().needs_mesh());
        assert!(!directory.get_chunk(ChunkPosition::new(1, 0)).unwrap().needs_mesh());
    }

    #[test]
    fn far_players_load_up_to_the_world_edge() {
        let mut directory = ChunkDirectory::new();
        let added = directory.load_chunks_around_player(Point3::new(1.0e12, 64.0, 0.0), 1);

        assert_eq!(added.len(), 6);
        assert!(added.iter().all(|position| position.x <= MAX_CHUNK_COORDINATE));
        assert!(directory.chunk_exists(ChunkPosition::new(MAX_CHUNK_COORDINATE, 1)));
        assert!(directory.chunk_exists(ChunkPosition::new(MAX_CHUNK_COORDINATE - 1, -1)));

        let added = directory.load_chunks_around_player(Point3::new(-1.0e12, 64.0, -1.0e12), 2);
        assert_eq!(added.len(), 9);

        // Voxels past the edge chunk are outside the world
        let edge = ChunkPosition::new(MAX_CHUNK_COORDINATE, 0).voxel_origin();
        assert_eq!(directory.get_voxel(Point3::new(edge.x + 15, 3, 0)), Some(0));
        assert_eq!(directory.get_voxel(Point3::new(edge.x + 16, 3, 0)), None);
        assert_eq!(directory.get_voxel(Point3::new(i32::MAX, 3, 0)), None);
        assert_eq!(directory.get_voxel(Point3::new(i32::MIN, 3, i32::MIN)), None);
    }

    #[test]
    fn load_around_player_covers_radius_once() {
        let mut directory = ChunkDirectory::new();
        let added = directory.load_chunks_around_player(Point3::new(-8.0, 64.0, 40.0), 2);

        assert_eq!(added.len(), 25);
        assert_eq!(directory.len(), 25);
        assert!(directory.chunk_exists(ChunkPosition::new(-1, 2)));
        assert!(directory.chunk_exists(ChunkPosition::new(-3, 0)));
        assert!(directory.chunk_exists(ChunkPosition::new(1, 4)));
        assert!(!directory.chunk_exists(ChunkPosition::new(2, 2)));

        let again = directory.load_chunks_around_player(Point3::new(-8.0, 64.0, 40.0), 2);
        assert!(again.is_empty());
        assert_eq!(directory.len(), 25);

        let shifted = directory.load_chunks_around_player(Point3::new(8.0, 64.0, 40.0), 2);
        assert_eq!(shifted.len(), 5);
        assert_eq!(directory.len(), 30);
    }
}
