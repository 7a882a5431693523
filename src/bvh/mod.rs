//! BVH buffer records
//!
//! Passive, GPU-layout storage consumed by the treelet-reorder pass:
//! topology nodes and input primitives. The bounding boxes live in
//! [`crate::math::Aabb`], one per node by index.

pub mod node;
pub mod primitive;

pub use node::{HierarchyNode, INVALID_NODE_INDEX};
pub use primitive::Primitive;
