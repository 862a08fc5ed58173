//! # Config Module
//!
//! World settings, read from JSON once at startup.
//!
//! ```json
//! {
//!     "seed": 1337,
//!     "load_radius": 5,
//!     "generation": { "method": "terrain" },
//!     "block_data": "res/blockData.json"
//! }
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{
    error::VoxelError,
    voxels::{block::BlockRegistry, terrain::GenerationMethod, world::DEFAULT_LOAD_RADIUS},
};

/// Settings for a world.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the terrain noise. Two worlds with the same seed are identical.
    pub seed: u32,
    /// Chunks loaded in each direction around the player.
    pub load_radius: i32,
    /// How new chunks are filled.
    pub generation: GenerationMethod,
    /// Block table to load; the built-in table is used when unset.
    pub block_data: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            load_radius: DEFAULT_LOAD_RADIUS,
            generation: GenerationMethod::default(),
            block_data: None,
        }
    }
}

impl WorldConfig {
    /// Parses a config from JSON. A negative `load_radius` is clamped to zero.
    pub fn from_json_str(json: &str) -> Result<Self, VoxelError> {
        let mut config: WorldConfig =
            serde_json::from_str(json).map_err(|source| VoxelError::Parse {
                what: "world config",
                source,
            })?;
        config.load_radius = config.load_radius.max(0);
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// A relative `block_data` path is resolved against the config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VoxelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| VoxelError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = Self::from_json_str(&json)?;
        if let (Some(block_data), Some(parent)) = (&config.block_data, path.parent()) {
            if block_data.is_relative() {
                config.block_data = Some(parent.join(block_data));
            }
        }
        Ok(config)
    }

    /// Loads the configured block table, or the built-in one.
    pub fn load_block_registry(&self) -> Result<BlockRegistry, VoxelError> {
        match &self.block_data {
            Some(path) => BlockRegistry::from_file(path),
            None => Ok(BlockRegistry::default()),
        }
    }
}
