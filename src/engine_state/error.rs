//! # Error Module
//!
//! Errors raised by voxel storage and by the loaders for external data
//! (block tables, world configuration).
//!
//! A chunk that is not loaded is never an error: lookups that can miss return
//! `Option` and callers treat `None` as empty space.

use thiserror::Error;

/// Errors that can occur in the voxel engine.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// A local voxel coordinate fell outside the chunk bounds.
    #[error("local voxel coordinate ({x}, {y}, {z}) is outside the chunk bounds")]
    OutOfRange {
        /// Local x coordinate.
        x: i64,
        /// Local y coordinate.
        y: i64,
        /// Local z coordinate.
        z: i64,
    },

    /// A JSON document could not be parsed.
    #[error("failed to parse {what}: {source}")]
    Parse {
        /// What was being parsed (e.g. "block table").
        what: &'static str,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that was being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The block table declared block 0 (air) as opaque.
    #[error("block id 0 is reserved for air and must be transparent")]
    AirNotTransparent,
}
