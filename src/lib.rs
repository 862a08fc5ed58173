#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Chunks
//!
//! Chunked voxel storage and face-culling mesh generation for a block world.
//!
//! The world is a sparse grid of `16 x 128 x 16` chunks. Each chunk is filled from a
//! seeded noise function and turned into a triangle mesh that contains only the
//! faces next to air, transparent blocks, or unloaded space. Drawing the meshes is
//! left to a [`RenderBackend`] supplied by the caller.
//!
//! ## Key Modules
//!
//! * `engine_state::voxels` - Block table, chunk storage, chunk directory and terrain
//! * `engine_state::rendering` - Mesh building and the render backend interface
//! * `engine_state::config` - World settings
//!
//! ## Usage
//!
//! ```no_run
//! // Native demo: loads a world around the origin and logs what was built
//! fn main() {
//!     voxel_chunks::run().unwrap();
//! }
//! ```

use cgmath::Point3;
use log::info;

pub mod engine_state;

pub use engine_state::{
    config::WorldConfig,
    error::VoxelError,
    rendering::{HeadlessBackend, MeshBuffers, MeshBuilder, MeshHandle, RenderBackend},
    voxels::{
        block::{BlockId, BlockProperties, BlockRegistry, AIR, SOLID},
        chunk::{
            voxel_grid::VoxelGrid, Chunk, ChunkPosition, CHUNK_HEIGHT, CHUNK_WIDTH,
            MAX_CHUNK_COORDINATE,
        },
        terrain::{GenerationMethod, TerrainGenerator},
        world::ChunkDirectory,
    },
    EngineState, UpdateReport,
};

/// Name of the environment variable holding an optional world config path.
pub const CONFIG_ENV_VAR: &str = "VOXEL_WORLD_CONFIG";

/// Number of simulated frames the demo runs.
const DEMO_FRAMES: usize = 8;

/// Runs the headless demo.
///
/// Initializes logging from `RUST_LOG`, loads the world config named by
/// `VOXEL_WORLD_CONFIG` (or the defaults), then walks a player along +X, updating and
/// drawing the world each frame.
pub fn run() -> Result<(), VoxelError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => WorldConfig::from_file(path)?,
        None => WorldConfig::default(),
    };

    let mut engine = EngineState::new(config)?;
    let mut backend = HeadlessBackend::new();

    for frame in 0..DEMO_FRAMES {
        let player = Point3::new(frame as f32 * CHUNK_WIDTH as f32, 80.0, 0.0);
        let report = engine.update(player, &mut backend);
        engine.render(&mut backend);
        info!(
            "frame {}: {} new chunks, {} meshed, {} chunks loaded",
            frame,
            report.chunks_added.len(),
            report.chunks_meshed,
            engine.world.len()
        );
    }

    info!(
        "{} meshes resident ({} bytes), {} draw calls, {} indices drawn",
        backend.mesh_count(),
        backend.resident_bytes(),
        backend.draw_calls,
        backend.indices_drawn
    );

    Ok(())
}
