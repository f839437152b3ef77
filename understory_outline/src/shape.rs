// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The structural capability interface and the collapse-aware flattener.
//!
//! ## Overview
//!
//! [`TreeShape`] is everything the flattener, the snapshot, and the drag solver need
//! to know about a hierarchy: the top-level sequence, parent links, ordered children,
//! and the collapsed state. [`Tree`](crate::Tree) implements it; so can any other
//! hierarchy whose nodes are keyed by [`NodeId`].
//!
//! All provided methods walk the structure iteratively, so deep outlines cannot
//! overflow the call stack.

use alloc::vec::Vec;

use crate::types::{FlatNode, NodeId};

/// Read access to an ordered forest.
///
/// Implementations must describe a forest: every live node is either top-level or
/// listed in exactly one parent's children, and no node is its own ancestor.
pub trait TreeShape {
    /// Top-level nodes in display order.
    fn top_level(&self) -> &[NodeId];

    /// Returns true if `id` refers to a live node.
    fn contains(&self, id: NodeId) -> bool;

    /// Parent of `id`; `None` for top-level, detached, or unknown nodes.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Children of `id` in display order; empty for unknown nodes.
    fn children(&self, id: NodeId) -> &[NodeId];

    /// Returns true if the descendants of `id` are hidden from flattening.
    fn is_collapsed(&self, id: NodeId) -> bool;

    /// Number of ancestors of `id`.
    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    /// Returns true if `id` has at least one child.
    fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// Returns true if `id` is the last entry in its parent's children.
    ///
    /// Top-level and detached nodes have no parent and are never a last child.
    fn is_last_child(&self, id: NodeId) -> bool {
        self.parent(id)
            .and_then(|p| self.children(p).last().copied())
            .is_some_and(|last| last == id)
    }

    /// Returns true if `ancestor` appears on the path from `node` to its root.
    ///
    /// A node counts as its own ancestor here, which is what cycle checks want.
    fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Path from the root down to `id` (inclusive).
    fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            out.push(n);
            cur = self.parent(n);
        }
        out.reverse();
        out
    }

    /// Number of levels below `id`; `0` for a leaf.
    ///
    /// Counts every descendant regardless of collapse state.
    fn subtree_height(&self, id: NodeId) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        stack.push((id, 0));
        while let Some((n, level)) = stack.pop() {
            height = height.max(level);
            for &c in self.children(n) {
                stack.push((c, level + 1));
            }
        }
        height
    }

    /// Depth of the deepest node in the subtree rooted at `id`.
    fn max_depth(&self, id: NodeId) -> usize {
        self.depth(id) + self.subtree_height(id)
    }

    /// Number of nodes beneath `id`, excluding `id` itself.
    fn descendant_count(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        while let Some(n) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.children(n));
        }
        count
    }
}

/// Flatten a whole forest into display order.
///
/// Depth-first pre-order over the top-level sequence. Collapsed nodes are emitted but
/// their descendants are skipped.
///
/// ```
/// use understory_outline::{NodeArena, Tree, flatten};
///
/// let mut arena = NodeArena::new();
/// let a = arena.insert();
/// let b = arena.insert();
/// arena.add_child(a, b, None).unwrap();
/// let tree = Tree::new(arena, [a]).unwrap();
///
/// let rows: Vec<_> = flatten(&tree).map(|row| (row.id, row.depth)).collect();
/// assert_eq!(rows, vec![(a, 0), (b, 1)]);
/// ```
pub fn flatten<S: TreeShape + ?Sized>(shape: &S) -> Flatten<'_, S> {
    let stack = shape
        .top_level()
        .iter()
        .rev()
        .map(|&id| FlatNode { id, depth: 0 })
        .collect();
    Flatten { shape, stack }
}

/// Flatten the subtree rooted at `id`.
///
/// Depths are absolute (relative to the forest), so rows can be spliced into a full
/// flattening. An unknown `id` yields nothing.
pub fn flatten_subtree<S: TreeShape + ?Sized>(shape: &S, id: NodeId) -> Flatten<'_, S> {
    let mut stack = Vec::new();
    if shape.contains(id) {
        stack.push(FlatNode {
            id,
            depth: shape.depth(id),
        });
    }
    Flatten { shape, stack }
}

/// Lazy flattening iterator returned by [`flatten`] and [`flatten_subtree`].
pub struct Flatten<'a, S: ?Sized> {
    shape: &'a S,
    stack: Vec<FlatNode>,
}

impl<S: ?Sized> core::fmt::Debug for Flatten<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Flatten")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<S: TreeShape + ?Sized> Iterator for Flatten<'_, S> {
    type Item = FlatNode;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.stack.pop()?;
        if !self.shape.is_collapsed(row.id) {
            // Reverse so the first child is popped first.
            for &child in self.shape.children(row.id).iter().rev() {
                self.stack.push(FlatNode {
                    id: child,
                    depth: row.depth + 1,
                });
            }
        }
        Some(row)
    }
}
