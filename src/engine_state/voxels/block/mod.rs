//! # Block Module
//!
//! This module provides block identifiers and the data-driven block property table.
//!
//! Blocks are stored in chunks as plain [`BlockId`] values. Everything else about a
//! block (its name, whether it can be seen through) lives in a [`BlockRegistry`]
//! loaded once from JSON before any meshing happens.
//!
//! ## Table Format
//!
//! ```json
//! {
//!     "0": { "name": "air", "transparent": true },
//!     "1": { "name": "block" }
//! }
//! ```
//!
//! `transparent` defaults to `false`. IDs missing from the table are treated as
//! solid and opaque.

use std::{collections::BTreeMap, path::Path};

use bitvec::vec::BitVec;
use serde::Deserialize;

use crate::engine_state::error::VoxelError;

pub mod block_side;

/// The integer type used to store a block in a chunk.
pub type BlockId = u16;

/// The reserved ID for empty space.
pub const AIR: BlockId = 0;

/// The ID the built-in table and the terrain generator use for solid ground.
pub const SOLID: BlockId = 1;

/// Properties shared by every voxel with the same [`BlockId`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BlockProperties {
    /// Human readable block name.
    pub name: String,
    /// Whether faces behind this block remain visible.
    #[serde(default)]
    pub transparent: bool,
}

impl BlockProperties {
    /// Creates a new set of block properties.
    pub fn new(name: impl Into<String>, transparent: bool) -> Self {
        BlockProperties {
            name: name.into(),
            transparent,
        }
    }
}

/// Lookup table from [`BlockId`] to [`BlockProperties`].
///
/// Transparency is mirrored into a dense bitmap indexed by ID so the mesher can
/// answer "can I see through this neighbor" without a map lookup.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    entries: BTreeMap<BlockId, BlockProperties>,
    transparent: BitVec,
}

impl BlockRegistry {
    /// Builds a registry from a set of entries.
    ///
    /// Air is added when absent. An entry for air that is not transparent is rejected.
    pub fn from_entries(
        mut entries: BTreeMap<BlockId, BlockProperties>,
    ) -> Result<Self, VoxelError> {
        match entries.get(&AIR) {
            Some(air) if !air.transparent => return Err(VoxelError::AirNotTransparent),
            Some(_) => {}
            None => {
                entries.insert(AIR, BlockProperties::new("air", true));
            }
        }

        Ok(Self::index(entries))
    }

    fn index(entries: BTreeMap<BlockId, BlockProperties>) -> Self {
        let len = entries.keys().next_back().map_or(0, |id| *id as usize + 1);
        let mut transparent = BitVec::repeat(false, len);
        for (id, properties) in &entries {
            transparent.set(*id as usize, properties.transparent);
        }

        BlockRegistry {
            entries,
            transparent,
        }
    }

    /// Parses a registry from a JSON block table.
    pub fn from_json_str(json: &str) -> Result<Self, VoxelError> {
        let entries: BTreeMap<BlockId, BlockProperties> =
            serde_json::from_str(json).map_err(|source| VoxelError::Parse {
                what: "block table",
                source,
            })?;
        Self::from_entries(entries)
    }

    /// Reads and parses a JSON block table from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VoxelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| VoxelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the properties registered for `id`, if any.
    pub fn get(&self, id: BlockId) -> Option<&BlockProperties> {
        self.entries.get(&id)
    }

    /// Returns the registered name of `id`, if any.
    pub fn name_of(&self, id: BlockId) -> Option<&str> {
        self.get(id).map(|properties| properties.name.as_str())
    }

    /// Whether `id` has an entry in the table.
    pub fn contains(&self, id: BlockId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Whether faces behind `id` can be seen.
    ///
    /// Unknown IDs are opaque.
    #[inline]
    pub fn is_transparent(&self, id: BlockId) -> bool {
        id == AIR || self.transparent.get(id as usize).is_some_and(|bit| *bit)
    }

    /// Whether a face adjacent to `neighbor` should be drawn.
    ///
    /// `None` means the neighbor lies in a chunk that is not loaded, which is
    /// treated the same as air.
    #[inline]
    pub fn is_visible_through(&self, neighbor: Option<BlockId>) -> bool {
        neighbor.map_or(true, |id| self.is_transparent(id))
    }

    /// Number of registered block types, air included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: air is registered in every table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BlockRegistry {
    /// The built-in table: air and a single opaque block.
    fn default() -> Self {
        let entries = BTreeMap::from([
            (AIR, BlockProperties::new("air", true)),
            (SOLID, BlockProperties::new("block", false)),
        ]);
        BlockRegistry::index(entries)
    }
}
