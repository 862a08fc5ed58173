//! # Terrain Module
//!
//! Procedural fill for new chunks.
//!
//! [`TerrainGenerator`] maps a global voxel coordinate to a block ID. It holds
//! nothing but a seeded simplex noise source, so the same seed produces the same
//! world on every run.
//!
//! ## Generation Methods
//!
//! Several strategies are supported, picked through [`GenerationMethod`]:
//! - `terrain`: height map from 2D simplex noise
//! - `caves`: 3D simplex noise thresholded at zero
//! - `flat`: solid below a fixed height
//! - `checkerboard`: alternating solid and air blocks
//! - `solid` / `empty`: uniform chunks (for testing)

use cgmath::Point3;
use noise::{NoiseFn, Simplex};
use serde::Deserialize;

use super::{
    block::{BlockId, AIR, SOLID},
    chunk::CHUNK_HEIGHT,
};

/// Horizontal scale applied to global coordinates before sampling the height map.
pub const TERRAIN_SCALE: f64 = 20.0;
/// Scale applied to global coordinates before sampling 3D cave noise.
pub const CAVE_SCALE: f64 = 10.0;

/// The method used to fill newly added chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Rolling hills from a 2D height map.
    #[default]
    Terrain,
    /// Blobby solid regions from 3D noise.
    Caves,
    /// Solid below `height`, air at and above it.
    Flat {
        /// First Y that is air.
        height: i32,
    },
    /// Alternates between solid and air blocks along every axis.
    Checkerboard,
    /// Every block solid.
    Solid,
    /// Every block air.
    Empty,
}

/// Deterministic, seeded map from global voxel coordinates to block IDs.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    seed: u32,
    noise: Simplex,
}

impl TerrainGenerator {
    /// Creates a generator for the given world seed.
    pub fn new(seed: u32) -> Self {
        TerrainGenerator {
            seed,
            noise: Simplex::new(seed),
        }
    }

    /// The world seed this generator was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// 2D coherent noise in `[-1, 1]`.
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y]).clamp(-1.0, 1.0)
    }

    /// 3D coherent noise in `[-1, 1]`.
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Terrain surface height at a global column, in `[0, CHUNK_HEIGHT]`.
    pub fn height_at(&self, global_x: i32, global_z: i32) -> i32 {
        let half_height = CHUNK_HEIGHT as f64 / 2.0;
        let sample = self.noise2d(
            global_x as f64 / TERRAIN_SCALE,
            global_z as f64 / TERRAIN_SCALE,
        );
        (sample * half_height + half_height).floor() as i32
    }

    /// Height-map terrain: solid below the surface, air above.
    pub fn map_definition(&self, global: Point3<i32>) -> BlockId {
        if global.y < self.height_at(global.x, global.z) {
            SOLID
        } else {
            AIR
        }
    }

    /// Evaluates `method` at a global coordinate.
    pub fn block_at(&self, method: GenerationMethod, global: Point3<i32>) -> BlockId {
        match method {
            GenerationMethod::Terrain => self.map_definition(global),
            GenerationMethod::Caves => {
                let sample = self.noise3d(
                    global.x as f64 / CAVE_SCALE,
                    global.y as f64 / CAVE_SCALE,
                    global.z as f64 / CAVE_SCALE,
                );
                if sample > 0.0 {
                    SOLID
                } else {
                    AIR
                }
            }
            GenerationMethod::Flat { height } => {
                if global.y < height {
                    SOLID
                } else {
                    AIR
                }
            }
            GenerationMethod::Checkerboard => {
                if (global.x + global.y + global.z).rem_euclid(2) == 0 {
                    SOLID
                } else {
                    AIR
                }
            }
            GenerationMethod::Solid => SOLID,
            GenerationMethod::Empty => AIR,
        }
    }
}
