//! Input primitive (triangle)

use bytemuck::{Pod, Zeroable};

use crate::core::types::Vec3;
use crate::math::Aabb;

/// Input triangle - 36 bytes, tightly packed vertex triple
///
/// Referenced by leaf nodes only; never mutated by the reorder pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Primitive {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Primitive {
    /// Create a triangle from three vertices
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Bounding box of the triangle
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.v0.min(self.v1).min(self.v2),
            max: self.v0.max(self.v1).max(self.v2),
        }
    }

    /// Centroid of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }
}
