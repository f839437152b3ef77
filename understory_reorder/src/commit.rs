// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Apply a solved drop to the live tree.

use tracing::{debug, instrument};
use understory_outline::{NodeId, Snapshot, Tree, TreeShape};

use crate::config::ReorderConfig;
use crate::error::ReorderError;
use crate::solver::find_parent_slot;

/// Nodes whose rows must be redrawn after a committed move.
///
/// Only the moved node and its old and new parents change structurally; every other row keeps
/// its children, though rows may shift position in the flattened list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Invalidation {
    /// The node that moved.
    pub moved: NodeId,
    /// Its parent before the move; `None` if it was top-level.
    pub old_parent: Option<NodeId>,
    /// Its parent after the move; `None` if it is now top-level.
    pub new_parent: Option<NodeId>,
}

impl Invalidation {
    /// Returns true if the node changed parent rather than only position among siblings.
    pub fn reparented(&self) -> bool {
        self.old_parent != self.new_parent
    }

    /// The affected nodes, each once: moved node first, then old and new parent.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        let new_parent = self.new_parent.filter(|_| self.reparented());
        core::iter::once(self.moved)
            .chain(self.old_parent)
            .chain(new_parent)
    }
}

/// Move `dragged` to where it sits in the hypothetical `order`, at `depth`.
///
/// `order` is normally [`Snapshot::relocated`] for the drop position. The new parent is the
/// nearest row above the dragged row that is shallower than `depth`; the child index counts
/// the rows at `depth` in between.
///
/// Fails without touching the tree if the depth cannot be realised at that position, the new
/// parent is the dragged node or one of its descendants, or the dragged subtree would nest
/// deeper than [`ReorderConfig::max_depth`].
#[instrument(level = "debug", skip(tree, order, config))]
pub fn commit_move(
    tree: &mut Tree,
    order: &Snapshot,
    dragged: NodeId,
    depth: usize,
    config: &ReorderConfig,
) -> Result<Invalidation, ReorderError> {
    let position = order
        .position(dragged)
        .filter(|_| tree.contains(dragged))
        .ok_or(ReorderError::UnknownNode(dragged))?;
    let rows = order.rows();
    let slot = find_parent_slot(rows, position, depth);
    let parent = slot.parent_row.and_then(|i| rows.get(i));

    let realisable = match parent {
        Some(p) => p.depth + 1 == depth,
        None => depth == 0,
    };
    if !realisable {
        let max = position
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .map_or(0, |prev| prev.depth + 1);
        return Err(ReorderError::DepthOutOfRange { depth, max });
    }

    let new_parent = parent.map(|p| p.id);
    if let Some(p) = new_parent {
        if !tree.contains(p) {
            return Err(ReorderError::UnknownNode(p));
        }
        if tree.is_ancestor_of(dragged, p) {
            return Err(ReorderError::DegenerateDrag {
                node: dragged,
                parent: p,
            });
        }
    }

    let nested = depth + tree.subtree_height(dragged);
    if nested > config.max_depth {
        return Err(ReorderError::NestingTooDeep {
            depth: nested,
            max: config.max_depth,
        });
    }

    let old_parent = tree.move_node(dragged, new_parent, slot.index)?;
    debug!(?dragged, ?old_parent, ?new_parent, index = slot.index, "committed move");
    Ok(Invalidation {
        moved: dragged,
        old_parent,
        new_parent,
    })
}
