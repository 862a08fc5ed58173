//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block.
//!
//! Faces are numbered so that `axis = side % 3` and `positive = side / 3 == 1`,
//! which lets the mesher walk all faces with a single index.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BOTTOM, LEFT, BACK, TOP, RIGHT], i.e. the three
/// negative-facing sides (-X, -Y, -Z) followed by the positive ones (+X, +Y, +Z).
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing negative X)
    FRONT = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The left face (facing negative Z)
    LEFT = 2,

    /// The back face (facing positive X)
    BACK = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The right face (facing positive Z)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::BACK,
            BlockSide::TOP,
            BlockSide::RIGHT,
        ]
    }

    /// Returns the face lying on `axis` (0 = X, 1 = Y, 2 = Z), on the positive
    /// or negative end of the unit cube.
    ///
    /// # Panics
    /// Panics if `axis` is not 0, 1 or 2.
    pub fn from_axis(axis: usize, positive: bool) -> Self {
        Self::all()[axis + if positive { 3 } else { 0 }]
    }

    /// The axis this face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    #[inline]
    pub fn axis(self) -> usize {
        self as usize % 3
    }

    /// Whether this face points along the positive direction of its axis.
    #[inline]
    pub fn is_positive(self) -> bool {
        self as usize >= 3
    }

    /// `-1` for negative faces, `+1` for positive ones.
    #[inline]
    pub fn sign(self) -> i32 {
        if self.is_positive() {
            1
        } else {
            -1
        }
    }

    /// The two in-plane axes spanning this face, `(axis + 1) % 3` and `(axis + 2) % 3`.
    #[inline]
    pub fn tangent_axes(self) -> (usize, usize) {
        let axis = self.axis();
        ((axis + 1) % 3, (axis + 2) % 3)
    }

    /// Unit step from a voxel to the neighbor this face touches.
    pub fn offset(self) -> Vector3<i32> {
        let mut offset = Vector3::new(0, 0, 0);
        offset[self.axis()] = self.sign();
        offset
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }
}
