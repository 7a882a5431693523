//! Treelet - reorder-state tracking for parallel BVH construction
//!
//! During BVH construction, a treelet-reordering pass restructures local
//! subtrees to improve traversal quality. Thousands of unordered worker
//! lanes touch shared hierarchy nodes while doing so, and need a cheap,
//! contention-tolerant way to mark per-node state. This crate provides
//! that state layer: the atomically-updated bubble buffer (one status bit
//! per node), the passive node/AABB/triangle-count/primitive stores it
//! sits beside, and the dispatch-scoped arena that owns all of them.
//!
//! Treelet formation, SAH evaluation, and the top-level LBVH build are
//! external collaborators that operate on this state.

pub mod core;
pub mod math;
pub mod bvh;
pub mod reorder;
