//! Dispatch-scoped buffer arena
//!
//! One `ReorderArena` owns every buffer a reorder dispatch touches: the
//! hierarchy, AABB, triangle-count, and primitive arrays plus the bubble
//! buffer. Buffers are never ambient globals; the arena is passed
//! explicitly and reclaimed wholesale when the build finishes.

use bytemuck::Zeroable;

use crate::bvh::{HierarchyNode, Primitive};
use crate::core::error::Error;
use crate::core::types::Result;
use crate::math::Aabb;
use crate::reorder::bubble::BubbleBuffer;
use crate::reorder::params::ReorderParams;

/// Owner of all per-dispatch reorder state
pub struct ReorderArena {
    params: ReorderParams,
    hierarchy: Vec<HierarchyNode>,
    aabbs: Vec<Aabb>,
    triangle_counts: Vec<u32>,
    primitives: Vec<Primitive>,
    bubbles: BubbleBuffer,
}

/// Simultaneous borrows of the arena for the guard pattern: shared
/// bubble buffer, exclusive stores. The caller partitions the mutable
/// slices across its lanes (e.g. `split_at_mut`, `chunks_mut`).
pub struct ReorderViewMut<'a> {
    pub params: ReorderParams,
    pub bubbles: &'a BubbleBuffer,
    pub hierarchy: &'a mut [HierarchyNode],
    pub aabbs: &'a mut [Aabb],
    pub triangle_counts: &'a mut [u32],
    pub primitives: &'a [Primitive],
}

impl ReorderArena {
    /// Allocate zeroed buffers for `params.element_count` nodes
    pub fn allocate(params: ReorderParams) -> Result<Self> {
        params.validate()?;
        let n = params.element_count as usize;

        let arena = Self {
            params,
            hierarchy: vec![HierarchyNode::zeroed(); n],
            aabbs: vec![Aabb::zeroed(); n],
            triangle_counts: vec![0; n],
            primitives: vec![Primitive::zeroed(); n],
            bubbles: BubbleBuffer::new(params.element_count),
        };

        log::info!(
            "Allocated reorder arena: {} nodes, {} bubble words",
            params.element_count,
            arena.bubbles.word_count()
        );
        Ok(arena)
    }

    /// Adopt buffers produced by the upstream build stage
    ///
    /// Every array must hold exactly `params.element_count` entries;
    /// this is the one place buffer sizing is enforced. The bubble
    /// buffer is freshly zeroed.
    pub fn from_parts(
        params: ReorderParams,
        hierarchy: Vec<HierarchyNode>,
        aabbs: Vec<Aabb>,
        triangle_counts: Vec<u32>,
        primitives: Vec<Primitive>,
    ) -> Result<Self> {
        params.validate()?;
        let expected = params.element_count as usize;
        check_len("hierarchy", expected, hierarchy.len())?;
        check_len("aabbs", expected, aabbs.len())?;
        check_len("triangle_counts", expected, triangle_counts.len())?;
        check_len("primitives", expected, primitives.len())?;

        Ok(Self {
            params,
            hierarchy,
            aabbs,
            triangle_counts,
            primitives,
            bubbles: BubbleBuffer::new(params.element_count),
        })
    }

    pub fn params(&self) -> ReorderParams {
        self.params
    }

    pub fn node_count(&self) -> u32 {
        self.params.element_count
    }

    pub fn hierarchy(&self) -> &[HierarchyNode] {
        &self.hierarchy
    }

    pub fn hierarchy_mut(&mut self) -> &mut [HierarchyNode] {
        &mut self.hierarchy
    }

    pub fn aabbs(&self) -> &[Aabb] {
        &self.aabbs
    }

    pub fn aabbs_mut(&mut self) -> &mut [Aabb] {
        &mut self.aabbs
    }

    pub fn triangle_counts(&self) -> &[u32] {
        &self.triangle_counts
    }

    pub fn triangle_counts_mut(&mut self) -> &mut [u32] {
        &mut self.triangle_counts
    }

    /// Input primitives, read-only for the reorder pass
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn bubbles(&self) -> &BubbleBuffer {
        &self.bubbles
    }

    /// Borrow the shared bubble buffer and the exclusive stores at once
    pub fn split_mut(&mut self) -> ReorderViewMut<'_> {
        ReorderViewMut {
            params: self.params,
            bubbles: &self.bubbles,
            hierarchy: &mut self.hierarchy,
            aabbs: &mut self.aabbs,
            triangle_counts: &mut self.triangle_counts,
            primitives: &self.primitives,
        }
    }

    /// Clear every status bit between passes
    pub fn reset_bubbles(&mut self) {
        self.bubbles.reset();
    }
}

fn check_len(buffer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::SizeMismatch {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}
