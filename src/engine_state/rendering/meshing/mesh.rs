//! Mesh data structures for voxel rendering.
//!
//! [`MeshBuffers`] holds a chunk's surface as parallel attribute arrays plus a
//! triangle list, the layout the render backend uploads as-is.

use super::face::{Face, QUAD_TEXCOORDS};

/// Floats per vertex in [`MeshBuffers::positions`].
pub const POSITION_SIZE: usize = 3;
/// Floats per vertex in [`MeshBuffers::texcoords`].
pub const TEXCOORD_SIZE: usize = 2;
/// Floats per vertex in [`MeshBuffers::normals`].
pub const NORMAL_SIZE: usize = 3;
/// Vertices emitted per face.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices emitted per face.
pub const INDICES_PER_FACE: usize = 6;

/// The triangulated surface of one chunk.
///
/// All attribute arrays describe the same vertices: `positions.len() / 3`,
/// `texcoords.len() / 2` and `normals.len() / 3` are always equal, and every
/// entry of `triangles` is below that vertex count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Chunk-local vertex positions, 3 floats per vertex
    pub positions: Vec<f32>,
    /// Texture coordinates, 2 floats per vertex
    pub texcoords: Vec<f32>,
    /// Flat face normals, 3 floats per vertex
    pub normals: Vec<f32>,
    /// Triangle list, 3 indices per triangle
    pub triangles: Vec<u32>,
}

impl MeshBuffers {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `faces` quads.
    pub fn with_face_capacity(faces: usize) -> Self {
        let vertices = faces * VERTICES_PER_FACE;
        MeshBuffers {
            positions: Vec::with_capacity(vertices * POSITION_SIZE),
            texcoords: Vec::with_capacity(vertices * TEXCOORD_SIZE),
            normals: Vec::with_capacity(vertices * NORMAL_SIZE),
            triangles: Vec::with_capacity(faces * INDICES_PER_FACE),
        }
    }

    /// Appends one quad.
    pub fn push_face(&mut self, face: &Face) {
        let first_vertex = self.vertex_count() as u32;
        let normal = face.block_side.normal();

        for corner in face.corners() {
            self.positions.extend_from_slice(&corner);
        }
        for texcoord in QUAD_TEXCOORDS {
            self.texcoords.extend_from_slice(&texcoord);
        }
        for _ in 0..VERTICES_PER_FACE {
            self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        }
        self.triangles.extend_from_slice(&Face::indices(first_vertex));
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_SIZE
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of quads.
    pub fn face_count(&self) -> usize {
        self.vertex_count() / VERTICES_PER_FACE
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Checks the buffer invariants: matching attribute lengths, whole quads,
    /// whole triangles and in-range indices.
    pub fn validate(&self) -> bool {
        let vertices = self.vertex_count();
        self.positions.len() % POSITION_SIZE == 0
            && self.texcoords.len() == vertices * TEXCOORD_SIZE
            && self.normals.len() == vertices * NORMAL_SIZE
            && vertices % VERTICES_PER_FACE == 0
            && self.triangles.len() % 3 == 0
            && self.triangles.iter().all(|index| (*index as usize) < vertices)
    }

    /// Iterates over the normal of every vertex.
    pub fn vertex_normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.normals
            .chunks_exact(NORMAL_SIZE)
            .map(|normal| [normal[0], normal[1], normal[2]])
    }

    /// Position buffer as raw bytes for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Texture coordinate buffer as raw bytes for upload.
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    /// Normal buffer as raw bytes for upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index buffer as raw bytes for upload.
    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}
