//! # Voxel Engine Core
//!
//! This module contains the voxel data side of the engine: what is stored, where,
//! and how it is generated.
//!
//! ## Architecture
//!
//! * **Block**: block IDs and the data-driven property table
//! * **Chunk**: dense `16x128x16` columns of block IDs
//! * **World**: the sparse chunk directory and global coordinate lookups
//! * **Terrain**: seeded procedural fill for new chunks
//!
//! ## Data Flow
//!
//! 1. The world directory adds chunks around the player
//! 2. The terrain generator fills each new chunk
//! 3. The mesher reads the chunk and, at its edges, its neighbors through the directory
//! 4. Finished meshes are handed to the render backend

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
