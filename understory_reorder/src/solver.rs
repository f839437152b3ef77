// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which depths a dragged row may take at a tentative position.
//!
//! All queries here read a hypothetical order (usually [`Snapshot::relocated`]) plus the live
//! structure for parent links. Nothing is mutated.
//!
//! ## Rules
//!
//! Let `prev` be the row just above the dragged row and `next` the row just below it.
//!
//! - Default depth: one deeper than `prev` if `prev` has children (the row becomes its first
//!   child), otherwise the same depth as `prev`. `0` at the top of the list.
//! - One level deeper than the default is allowed when `prev` is a leaf: the row can become
//!   its only child.
//! - Minimum depth: shallower depths are only offered when the row sits at the end of its
//!   parent's visible subtree, so moving left cannot steal `next` from its parent. At the very
//!   end of the list every depth down to `0` is allowed.
//!
//! [`Snapshot::relocated`]: understory_outline::Snapshot::relocated

use understory_outline::{BareNode, NodeId, Snapshot, TreeShape};

/// Depths available to a dragged row at one position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DepthRange {
    /// Shallowest depth that keeps the following rows' parents intact.
    pub min_depth: usize,
    /// Depth the row takes when the pointer has not moved sideways.
    pub default_depth: usize,
    /// Whether `default_depth + 1` is also structurally possible.
    pub allows_deeper: bool,
}

impl DepthRange {
    /// Deepest structurally possible depth.
    pub fn max_depth(&self) -> usize {
        self.default_depth + usize::from(self.allows_deeper)
    }

    /// Returns true if `depth` lies within the range.
    pub fn contains(&self, depth: usize) -> bool {
        (self.min_depth..=self.max_depth()).contains(&depth)
    }

    /// Clamp `depth` into the range.
    pub fn clamp(&self, depth: usize) -> usize {
        depth.clamp(self.min_depth, self.max_depth())
    }
}

/// Where a row at some position and depth would be attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParentSlot {
    /// Position of the parent row in the order; `None` means top level.
    pub parent_row: Option<usize>,
    /// Child index under that parent (or in the top-level sequence).
    pub index: usize,
}

/// Find the parent and child index for a row placed at `position` with `depth`.
///
/// Scans upward from `position`: the first row shallower than `depth` is the parent, and the
/// rows at exactly `depth` passed on the way are the siblings in front of it.
pub fn find_parent_slot(order: &[BareNode], position: usize, depth: usize) -> ParentSlot {
    let above = &order[..position.min(order.len())];
    let mut index = 0;
    for (i, row) in above.iter().enumerate().rev() {
        if row.depth < depth {
            return ParentSlot {
                parent_row: Some(i),
                index,
            };
        }
        if row.depth == depth {
            index += 1;
        }
    }
    ParentSlot {
        parent_row: None,
        index,
    }
}

/// Compute the [`DepthRange`] for `dragged` in the hypothetical `order`.
///
/// Returns `None` if `dragged` is not in `order`.
pub fn solve<S: TreeShape + ?Sized>(
    order: &Snapshot,
    shape: &S,
    dragged: NodeId,
) -> Option<DepthRange> {
    let position = order.position(dragged)?;
    let prev = position.checked_sub(1).and_then(|i| order.row(i));
    let default_depth = match prev {
        Some(p) if p.has_children() => p.depth + 1,
        Some(p) => p.depth,
        None => 0,
    };
    let allows_deeper = prev.is_some_and(|p| !p.has_children());
    let min_depth = min_depth(order, shape, dragged, position, default_depth);
    Some(DepthRange {
        min_depth: min_depth.min(default_depth),
        default_depth,
        allows_deeper,
    })
}

fn min_depth<S: TreeShape + ?Sized>(
    order: &Snapshot,
    shape: &S,
    dragged: NodeId,
    position: usize,
    default_depth: usize,
) -> usize {
    let rows = order.rows();
    let slot = find_parent_slot(rows, position, default_depth);
    let Some(parent) = slot.parent_row.and_then(|i| rows.get(i)) else {
        return default_depth;
    };
    let Some(next) = rows.get(position + 1) else {
        return 0;
    };
    if parent.children.contains(&next.id) || !shape.contains(parent.id) {
        return default_depth;
    }
    least_possible_depth(shape, parent.id, default_depth, dragged).saturating_sub(1)
}

/// Unwind "last child" chains upward from `node`, starting at `depth`.
///
/// Each time `node` is the last child of its parent the depth drops by one and the walk moves
/// to the parent. `ignore` is treated as already detached, so it never counts as a later
/// sibling.
///
/// The live tree still holds the dragged node at its old place while a drag is in flight. If
/// it were counted, dragging the last child of a parent to the end of that parent's subtree
/// would see itself as a later sibling and stop the walk early, offering fewer shallow depths
/// than the hypothetical order actually allows. Pass the dragged node as `ignore`.
pub fn least_possible_depth<S: TreeShape + ?Sized>(
    shape: &S,
    node: NodeId,
    depth: usize,
    ignore: NodeId,
) -> usize {
    let mut node = node;
    let mut depth = depth;
    while let Some(parent) = shape.parent(node) {
        let last = shape
            .children(parent)
            .iter()
            .rev()
            .find(|&&c| c != ignore)
            .copied();
        if last != Some(node) || depth == 0 {
            break;
        }
        depth -= 1;
        node = parent;
    }
    depth
}
