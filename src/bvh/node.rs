//! BVH hierarchy node

use bytemuck::{Pod, Zeroable};

/// Sentinel index for "no node" (root's parent, unset children)
pub const INVALID_NODE_INDEX: u32 = u32::MAX;

/// Hierarchy node - exactly 16 bytes, structured-buffer compatible
///
/// Layout:
/// - parent_index (4 bytes): parent node, or INVALID_NODE_INDEX for the root
/// - left_index (4 bytes): internal = left child; leaf = first primitive
/// - right_index (4 bytes): internal = right child; leaf = primitive count
/// - flags (4 bytes): bit 0 leaf flag, bits 1-31 reserved
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct HierarchyNode {
    pub parent_index: u32,
    pub left_index: u32,
    pub right_index: u32,
    pub flags: u32,
}

const LEAF_FLAG: u32 = 1;

impl HierarchyNode {
    /// Create an internal node
    pub const fn internal(parent: u32, left: u32, right: u32) -> Self {
        Self {
            parent_index: parent,
            left_index: left,
            right_index: right,
            flags: 0,
        }
    }

    /// Create a leaf node covering `count` primitives starting at `first`
    pub const fn leaf(parent: u32, first_primitive: u32, count: u32) -> Self {
        Self {
            parent_index: parent,
            left_index: first_primitive,
            right_index: count,
            flags: LEAF_FLAG,
        }
    }

    /// Check the leaf flag (bit 0)
    pub fn is_leaf(&self) -> bool {
        self.flags & LEAF_FLAG != 0
    }

    /// Check if this node is the root (no parent)
    pub fn is_root(&self) -> bool {
        self.parent_index == INVALID_NODE_INDEX
    }

    /// Child indices, for internal nodes
    pub fn children(&self) -> Option<(u32, u32)> {
        if self.is_leaf() {
            None
        } else {
            Some((self.left_index, self.right_index))
        }
    }

    /// Primitive range (first, count), for leaf nodes
    pub fn primitives(&self) -> Option<(u32, u32)> {
        if self.is_leaf() {
            Some((self.left_index, self.right_index))
        } else {
            None
        }
    }
}

impl Default for HierarchyNode {
    fn default() -> Self {
        Self {
            parent_index: INVALID_NODE_INDEX,
            left_index: INVALID_NODE_INDEX,
            right_index: INVALID_NODE_INDEX,
            flags: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_alignment() {
        assert_eq!(std::mem::size_of::<HierarchyNode>(), 16);
        assert_eq!(std::mem::align_of::<HierarchyNode>(), 4);
    }

    #[test]
    fn test_internal_node() {
        let node = HierarchyNode::internal(INVALID_NODE_INDEX, 1, 2);
        assert!(!node.is_leaf());
        assert!(node.is_root());
        assert_eq!(node.children(), Some((1, 2)));
        assert_eq!(node.primitives(), None);
    }

    #[test]
    fn test_leaf_node() {
        let node = HierarchyNode::leaf(0, 12, 4);
        assert!(node.is_leaf());
        assert!(!node.is_root());
        assert_eq!(node.children(), None);
        assert_eq!(node.primitives(), Some((12, 4)));
    }
}
