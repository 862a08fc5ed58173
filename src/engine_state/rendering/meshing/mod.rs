//! Mesh generation for voxel rendering.
//!
//! This module converts a chunk's voxels into a triangle mesh containing only the
//! faces that can be seen.
//!
//! # Algorithm
//! For every non-air voxel and each of its six sides, the neighbor across that side
//! is looked up. The face is emitted as one quad (two triangles) when the neighbor
//! is air, a transparent block, or in a chunk that is not loaded. Neighbors inside
//! the chunk are read from the chunk itself; neighbors past its side edges are
//! resolved through the [`ChunkDirectory`].
//!
//! The world has no chunks above or below it, so its floor and ceiling are closed:
//! faces pointing out of `[0, CHUNK_HEIGHT)` are never emitted.
//!
//! The builder never merges faces and never patches an existing mesh: any edit
//! requires rebuilding the whole chunk. A chunk meshed before its neighbor loads
//! keeps the faces along that edge until it is rebuilt.
//!
//! # Performance Considerations
//! - O(W*W*H) per chunk, O(1) per face check
//! - Buffers are reserved up front and appended to in place

use std::collections::BTreeSet;

use cgmath::Point3;
use log::{debug, warn};
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, BlockId, BlockRegistry},
    chunk::{Chunk, CHUNK_HEIGHT, CHUNK_WIDTH},
    world::ChunkDirectory,
};

mod face;
mod mesh;

pub use face::{Face, QUAD_CORNERS, QUAD_INDICES, QUAD_TEXCOORDS};
pub use mesh::*;

/// Builds face-culled meshes for chunks.
///
/// The builder borrows the block table it culls against; the chunk directory used
/// for cross-chunk lookups is passed to each build.
#[derive(Clone, Copy, Debug)]
pub struct MeshBuilder<'a> {
    registry: &'a BlockRegistry,
}

impl<'a> MeshBuilder<'a> {
    /// Creates a builder that culls against `registry`.
    pub fn new(registry: &'a BlockRegistry) -> Self {
        MeshBuilder { registry }
    }

    /// Generates the mesh for `chunk`.
    ///
    /// `directory` answers neighbor queries past the chunk's edges. `chunk` does not
    /// need to be registered in it.
    pub fn generate_mesh(&self, chunk: &Chunk, directory: &ChunkDirectory) -> MeshBuffers {
        let started = Instant::now();
        let mut mesh = MeshBuffers::with_face_capacity(Self::estimate_visible_faces(chunk));
        let mut unknown_blocks = BTreeSet::new();

        for (position, block) in chunk.blocks() {
            if !self.registry.contains(block) {
                unknown_blocks.insert(block);
            }
            for block_side in BlockSide::all() {
                let Some(neighbor) = Self::neighbor_block(chunk, directory, position, block_side)
                else {
                    continue;
                };
                if self.registry.is_visible_through(neighbor) {
                    mesh.push_face(&Face::new(
                        position.x, position.y, position.z, block, block_side,
                    ));
                }
            }
        }

        for block in unknown_blocks {
            warn!(
                "chunk {:?} contains block id {} with no entry in the block table, treating it as opaque",
                chunk.position, block
            );
        }

        debug!(
            "meshed chunk {:?}: {} faces, {} vertices in {:?}",
            chunk.position,
            mesh.face_count(),
            mesh.vertex_count(),
            started.elapsed()
        );

        mesh
    }

    /// Looks up the block across `block_side` from the voxel at local `position`.
    ///
    /// The outer `None` means the neighbor is outside the world height and the face
    /// is closed. The inner `None` means the neighbor's chunk is not loaded.
    fn neighbor_block(
        chunk: &Chunk,
        directory: &ChunkDirectory,
        position: Point3<usize>,
        block_side: BlockSide,
    ) -> Option<Option<BlockId>> {
        let offset = block_side.offset();
        let local = Point3::new(
            position.x as i32 + offset.x,
            position.y as i32 + offset.y,
            position.z as i32 + offset.z,
        );

        if !(0..CHUNK_HEIGHT as i32).contains(&local.y) {
            return None;
        }

        let inside = (0..CHUNK_WIDTH as i32).contains(&local.x)
            && (0..CHUNK_WIDTH as i32).contains(&local.z);
        if inside {
            return Some(
                chunk
                    .get_voxel(local.x as usize, local.y as usize, local.z as usize)
                    .ok(),
            );
        }

        let origin = chunk.voxel_origin();
        Some(directory.get_voxel(Point3::new(
            origin.x + local.x,
            origin.y + local.y,
            origin.z + local.z,
        )))
    }

    /// Rough upper estimate of the faces a chunk will emit, used to size buffers.
    ///
    /// Terrain chunks are mostly a single surface, so the estimate is the lesser of
    /// six faces per solid voxel and the area of the chunk's bounding box.
    fn estimate_visible_faces(chunk: &Chunk) -> usize {
        const BOUNDING_AREA: usize =
            2 * CHUNK_WIDTH * CHUNK_WIDTH + 4 * CHUNK_WIDTH * CHUNK_HEIGHT;
        (chunk.voxels().solid_count() * 6).min(BOUNDING_AREA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::SOLID, chunk::ChunkPosition};

    fn count_faces(mesh: &MeshBuffers, normal: [f32; 3]) -> usize {
        mesh.vertex_normals().filter(|n| *n == normal).count() / VERTICES_PER_FACE
    }

    #[test]
    fn isolated_voxel_has_six_faces() {
        let registry = BlockRegistry::default();
        let mut directory = ChunkDirectory::new();
        directory
            .add_chunk(ChunkPosition::new(0, 0))
            .set_voxel(8, 64, 8, SOLID)
            .unwrap();

        let chunk = directory.get_chunk(ChunkPosition::new(0, 0)).unwrap();
        let mesh = MeshBuilder::new(&registry).generate_mesh(chunk, &directory);

        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate());
        for side in BlockSide::all() {
            let n = side.normal();
            assert_eq!(count_faces(&mesh, [n.x, n.y, n.z]), 1);
        }
    }

    #[test]
    fn adjacent_voxels_hide_shared_faces() {
        let registry = BlockRegistry::default();
        let directory = ChunkDirectory::new();
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0));
        chunk.set_voxel(4, 10, 4, SOLID).unwrap();
        chunk.set_voxel(5, 10, 4, SOLID).unwrap();

        let mesh = MeshBuilder::new(&registry).generate_mesh(&chunk, &directory);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(count_faces(&mesh, [1.0, 0.0, 0.0]), 1);
        assert_eq!(count_faces(&mesh, [-1.0, 0.0, 0.0]), 1);
    }

    #[test]
    fn transparent_neighbors_keep_faces() {
        let registry = BlockRegistry::from_json_str(
            r#"{ "1": { "name": "stone" }, "2": { "name": "glass", "transparent": true } }"#,
        )
        .unwrap();
        let directory = ChunkDirectory::new();
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0));
        chunk.set_voxel(4, 10, 4, 1).unwrap();
        chunk.set_voxel(4, 11, 4, 2).unwrap();

        let mesh = MeshBuilder::new(&registry).generate_mesh(&chunk, &directory);
        // stone keeps all six faces, glass loses the bottom one against the stone
        assert_eq!(mesh.face_count(), 11);
    }

    #[test]
    fn unknown_blocks_are_opaque() {
        let registry = BlockRegistry::default();
        let directory = ChunkDirectory::new();
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0));
        chunk.set_voxel(4, 10, 4, 40).unwrap();
        chunk.set_voxel(4, 11, 4, 41).unwrap();

        let mesh = MeshBuilder::new(&registry).generate_mesh(&chunk, &directory);
        assert_eq!(mesh.face_count(), 10);
    }

    #[test]
    fn world_floor_and_ceiling_are_closed() {
        let registry = BlockRegistry::default();
        let directory = ChunkDirectory::new();
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0));
        chunk.set_voxel(8, 0, 8, SOLID).unwrap();
        chunk.set_voxel(8, CHUNK_HEIGHT - 1, 8, SOLID).unwrap();

        let mesh = MeshBuilder::new(&registry).generate_mesh(&chunk, &directory);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(count_faces(&mesh, [0.0, -1.0, 0.0]), 1);
        assert_eq!(count_faces(&mesh, [0.0, 1.0, 0.0]), 1);
    }

    #[test]
    fn empty_chunk_has_empty_mesh() {
        let registry = BlockRegistry::default();
        let directory = ChunkDirectory::new();
        let chunk = Chunk::new(ChunkPosition::new(0, 0));

        let mesh = MeshBuilder::new(&registry).generate_mesh(&chunk, &directory);
        assert!(mesh.is_empty());
        assert!(mesh.validate());
    }
}
