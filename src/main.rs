//! # Voxel Chunks Demo Entry Point
//!
//! Native entry point for the headless demo. See [`voxel_chunks::run`].
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(error) = voxel_chunks::run() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
