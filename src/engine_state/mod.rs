//! # Engine State Module
//!
//! The core engine module that owns the world and drives chunk loading, generation
//! and meshing.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `config` - World settings loaded from JSON
//! * `error` - Error types shared by the engine
//! * `rendering` - Mesh building and the render backend interface
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Update Model
//!
//! Everything runs on the caller's thread. [`EngineState::update`] loads the chunks
//! around the player, fills the new ones, and rebuilds and uploads every chunk
//! without a current mesh before returning. Its cost is proportional to the number
//! of chunks added or edited since the previous call; once the area around the
//! player is loaded and unchanged, an update does no work.

use std::collections::HashMap;

use cgmath::Point3;
use log::info;
use web_time::Instant;

use config::WorldConfig;
use error::VoxelError;
use rendering::{MeshBuilder, MeshHandle, RenderBackend};
use voxels::{
    block::{BlockId, BlockRegistry},
    chunk::ChunkPosition,
    terrain::TerrainGenerator,
    world::ChunkDirectory,
};

pub mod config;
pub mod error;
pub mod rendering;
pub mod voxels;

/// What a single [`EngineState::update`] call did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Chunks added and filled by this update
    pub chunks_added: Vec<ChunkPosition>,
    /// Chunks whose mesh was (re)built and uploaded by this update
    pub chunks_meshed: usize,
}

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_chunks::{EngineState, HeadlessBackend, WorldConfig};
///
/// let config = WorldConfig { load_radius: 1, ..WorldConfig::default() };
/// let mut engine = EngineState::new(config).unwrap();
/// let mut backend = HeadlessBackend::new();
///
/// let report = engine.update(Point3::new(0.0, 80.0, 0.0), &mut backend);
/// assert_eq!(report.chunks_added.len(), 9);
/// engine.render(&mut backend);
/// ```
pub struct EngineState {
    /// World settings
    pub config: WorldConfig,
    /// Block property table used for culling
    pub registry: BlockRegistry,
    /// Fills new chunks
    pub generator: TerrainGenerator,
    /// The voxel world containing all chunk data
    pub world: ChunkDirectory,
    /// Uploaded mesh for each chunk
    mesh_handles: HashMap<ChunkPosition, MeshHandle>,
}

impl EngineState {
    /// Creates an engine with an empty world, loading the configured block table.
    pub fn new(config: WorldConfig) -> Result<Self, VoxelError> {
        let registry = config.load_block_registry()?;
        Ok(Self::with_registry(config, registry))
    }

    /// Creates an engine with an empty world and an already loaded block table.
    pub fn with_registry(config: WorldConfig, registry: BlockRegistry) -> Self {
        info!(
            "creating world with seed {} ({} block types, {:?} generation)",
            config.seed,
            registry.len(),
            config.generation
        );
        EngineState {
            generator: TerrainGenerator::new(config.seed),
            config,
            registry,
            world: ChunkDirectory::new(),
            mesh_handles: HashMap::new(),
        }
    }

    /// Loads and fills chunks around the player, then rebuilds and uploads every
    /// chunk without a current mesh.
    pub fn update(
        &mut self,
        player: Point3<f32>,
        backend: &mut impl RenderBackend,
    ) -> UpdateReport {
        let started = Instant::now();

        let chunks_added = self
            .world
            .load_chunks_around_player(player, self.config.load_radius);
        for position in &chunks_added {
            self.generate_chunk(*position);
        }
        let chunks_meshed = self.mesh_dirty_chunks(backend);

        if !chunks_added.is_empty() || chunks_meshed > 0 {
            info!(
                "update added {} chunks and meshed {} in {:?}",
                chunks_added.len(),
                chunks_meshed,
                started.elapsed()
            );
        }

        UpdateReport {
            chunks_added,
            chunks_meshed,
        }
    }

    /// Issues one draw per uploaded, non-empty chunk mesh.
    pub fn render(&self, backend: &mut impl RenderBackend) {
        for chunk in self.world.chunks() {
            let (Some(handle), Some(mesh)) =
                (self.mesh_handles.get(&chunk.position), chunk.mesh())
            else {
                continue;
            };
            if !mesh.is_empty() {
                backend.draw_indexed(*handle, mesh.triangles.len() as u32);
            }
        }
    }

    /// Sets a block at a global coordinate.
    ///
    /// The owning chunk, and any loaded chunk sharing the edge the block sits on,
    /// is remeshed on the next update.
    ///
    /// Returns `Ok(false)` if the chunk is not loaded.
    pub fn set_block(&mut self, global: Point3<i32>, block: BlockId) -> Result<bool, VoxelError> {
        self.world.set_voxel(global, block)
    }

    /// The handle of the mesh uploaded for a chunk, if any.
    pub fn mesh_handle(&self, position: ChunkPosition) -> Option<MeshHandle> {
        self.mesh_handles.get(&position).copied()
    }

    /// Fills the chunk at `position` from the configured generation method.
    fn generate_chunk(&mut self, position: ChunkPosition) {
        let generator = &self.generator;
        let method = self.config.generation;
        if let Some(chunk) = self.world.get_chunk_mut(position) {
            chunk.fill(|global| generator.block_at(method, global));
        }
    }

    /// Builds and uploads a mesh for every chunk that needs one.
    fn mesh_dirty_chunks(&mut self, backend: &mut impl RenderBackend) -> usize {
        let builder = MeshBuilder::new(&self.registry);

        let built: Vec<_> = self
            .world
            .chunks()
            .filter(|chunk| chunk.needs_mesh())
            .map(|chunk| {
                let mesh = builder.generate_mesh(chunk, &self.world);
                let handle = backend.upload_mesh(chunk.position, chunk.render_origin(), &mesh);
                (chunk.position, mesh, handle)
            })
            .collect();

        let meshed = built.len();
        for (position, mesh, handle) in built {
            if let Some(previous) = self.mesh_handles.insert(position, handle) {
                backend.release_mesh(previous);
            }
            if let Some(chunk) = self.world.get_chunk_mut(position) {
                chunk.set_mesh(mesh);
            }
        }
        meshed
    }
}
