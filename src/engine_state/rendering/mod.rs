//! Rendering system for the voxel engine.
//!
//! The engine builds meshes; drawing them is left to a [`RenderBackend`]. The
//! backend receives finished [`MeshBuffers`] once per build and is asked to draw
//! them by handle every frame. It knows nothing about chunks, blocks or culling,
//! and the engine knows nothing about shaders, uniforms or GPU objects.

use std::collections::HashMap;

use cgmath::Vector3;
use log::{debug, trace};

use super::voxels::chunk::ChunkPosition;

pub mod meshing;

pub use meshing::{MeshBuffers, MeshBuilder};

/// Opaque reference to a mesh uploaded to a [`RenderBackend`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// The drawing side of the engine.
pub trait RenderBackend {
    /// Uploads a finished chunk mesh.
    ///
    /// # Arguments
    /// * `position` - The chunk the mesh belongs to
    /// * `origin` - Translation to apply to the mesh's chunk-local positions
    /// * `mesh` - Vertex attributes and triangle list
    fn upload_mesh(
        &mut self,
        position: ChunkPosition,
        origin: Vector3<f32>,
        mesh: &MeshBuffers,
    ) -> MeshHandle;

    /// Frees a mesh previously returned by `upload_mesh`.
    fn release_mesh(&mut self, handle: MeshHandle);

    /// Draws `index_count` indices of an uploaded mesh as triangles.
    fn draw_indexed(&mut self, handle: MeshHandle, index_count: u32);
}

/// A mesh held by the [`HeadlessBackend`].
#[derive(Clone, Debug)]
pub struct UploadedMesh {
    /// The chunk the mesh belongs to
    pub position: ChunkPosition,
    /// Translation applied when drawing
    pub origin: Vector3<f32>,
    /// Total bytes across all uploaded buffers
    pub byte_len: usize,
    /// Number of indices in the triangle list
    pub index_count: u32,
}

/// Backend that keeps uploads in memory and counts draws.
///
/// Used where no GPU is available, such as the demo runner and tests.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    meshes: HashMap<MeshHandle, UploadedMesh>,
    next_handle: u64,
    /// Indices submitted through `draw_indexed` since creation
    pub indices_drawn: u64,
    /// Draw calls issued since creation
    pub draw_calls: u64,
}

impl HeadlessBackend {
    /// Creates a backend with nothing uploaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an uploaded mesh by handle.
    pub fn get(&self, handle: MeshHandle) -> Option<&UploadedMesh> {
        self.meshes.get(&handle)
    }

    /// Number of meshes currently uploaded.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Bytes held across all uploaded meshes.
    pub fn resident_bytes(&self) -> usize {
        self.meshes.values().map(|mesh| mesh.byte_len).sum()
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_mesh(
        &mut self,
        position: ChunkPosition,
        origin: Vector3<f32>,
        mesh: &MeshBuffers,
    ) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;

        let byte_len = mesh.position_bytes().len()
            + mesh.texcoord_bytes().len()
            + mesh.normal_bytes().len()
            + mesh.triangle_bytes().len();
        debug!(
            "uploading mesh {:?} for chunk {:?} ({} bytes)",
            handle, position, byte_len
        );

        self.meshes.insert(
            handle,
            UploadedMesh {
                position,
                origin,
                byte_len,
                index_count: mesh.triangles.len() as u32,
            },
        );
        handle
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_some() {
            trace!("released mesh {:?}", handle);
        }
    }

    fn draw_indexed(&mut self, handle: MeshHandle, index_count: u32) {
        if self.meshes.contains_key(&handle) {
            self.draw_calls += 1;
            self.indices_drawn += index_count as u64;
        }
    }
}
