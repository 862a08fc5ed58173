use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, BlockId};

/// In-plane offsets of the four quad corners along the face's two tangent axes,
/// in winding order.
pub const QUAD_CORNERS: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 1), (1, 0)];

/// Texture coordinates for the four quad corners.
///
/// Every face samples the full texture until blocks are mapped into an atlas.
pub const QUAD_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Triangle list for one quad, relative to its first vertex.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 3, 2, 0];

/// Represents a single visible unit face of a voxel.
///
/// A face is identified by the local position of the voxel it belongs to and the
/// side of that voxel's cube it lies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Local position of the owning voxel
    pub position: Point3<usize>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
    /// The block this face belongs to
    pub block: BlockId,
}

impl Face {
    /// Creates a new face for the voxel at `(i, j, k)`.
    pub fn new(i: usize, j: usize, k: usize, block: BlockId, block_side: BlockSide) -> Self {
        Face {
            position: Point3::new(i, j, k),
            block_side,
            block,
        }
    }

    /// The four corners of the face in chunk-local space.
    ///
    /// The corners sit on the `block_side` plane of the unit cube at `position`,
    /// spanning `{0, 1} x {0, 1}` over the two tangent axes in [`QUAD_CORNERS`] order.
    pub fn corners(&self) -> [[f32; 3]; 4] {
        let axis = self.block_side.axis();
        let (u, v) = self.block_side.tangent_axes();

        let mut base = [
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        ];
        if self.block_side.is_positive() {
            base[axis] += 1.0;
        }

        QUAD_CORNERS.map(|(du, dv)| {
            let mut corner = base;
            corner[u] += du as f32;
            corner[v] += dv as f32;
            corner
        })
    }

    /// Index data for this face once its first vertex lands at `first_vertex`.
    pub fn indices(first_vertex: u32) -> [u32; 6] {
        QUAD_INDICES.map(|index| first_vertex + index)
    }
}
