// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable, shape-only copies of a flattened outline.
//!
//! A [`Snapshot`] records what the flattener emitted at one instant: each visible row with its
//! depth, its full list of children, and its collapsed state. Speculative queries (such as "what
//! would the list look like if this row were dropped there?") run against snapshots so the live
//! tree is never touched until a move is committed.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::shape::{TreeShape, flatten};
use crate::types::NodeId;

/// A detached, depth-annotated copy of one flattened row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BareNode {
    /// The live node this row was captured from.
    pub id: NodeId,
    /// Depth at capture time.
    pub depth: usize,
    /// All children at capture time, including ones hidden by collapse.
    pub children: Vec<NodeId>,
    /// Collapsed state at capture time.
    pub collapsed: bool,
}

impl BareNode {
    fn capture<S: TreeShape + ?Sized>(shape: &S, id: NodeId, depth: usize) -> Self {
        Self {
            id,
            depth,
            children: shape.children(id).to_vec(),
            collapsed: shape.is_collapsed(id),
        }
    }

    /// Returns true if the node had children when captured.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// An ordered sequence of [`BareNode`] rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    rows: Vec<BareNode>,
    // id -> row position
    index: BTreeMap<NodeId, usize>,
}

impl Snapshot {
    /// Capture the current flattening of `shape`.
    pub fn capture<S: TreeShape + ?Sized>(shape: &S) -> Self {
        Self::from_rows(
            flatten(shape)
                .map(|row| BareNode::capture(shape, row.id, row.depth))
                .collect(),
        )
    }

    /// Capture rows in an explicit display order, as supplied by a presentation layer.
    ///
    /// Depths come from the live structure. Unknown ids are skipped, and so are repeats of an
    /// id already taken.
    pub fn from_order<S: TreeShape + ?Sized>(shape: &S, order: &[NodeId]) -> Self {
        let mut rows = Vec::with_capacity(order.len());
        let mut seen = BTreeSet::new();
        for &id in order {
            if shape.contains(id) && seen.insert(id) {
                rows.push(BareNode::capture(shape, id, shape.depth(id)));
            }
        }
        Self::from_rows(rows)
    }

    fn from_rows(rows: Vec<BareNode>) -> Self {
        let index = rows.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        Self { rows, index }
    }

    /// All rows in display order.
    pub fn rows(&self) -> &[BareNode] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `position`.
    pub fn row(&self, position: usize) -> Option<&BareNode> {
        self.rows.get(position)
    }

    /// Row for `id`, if it was captured.
    pub fn get(&self, id: NodeId) -> Option<&BareNode> {
        self.position(id).and_then(|i| self.rows.get(i))
    }

    /// Display position of `id`, if it was captured.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Hypothetical order with `dragged` moved so that it ends up at row `destination`.
    ///
    /// The dragged row is lifted together with any deeper rows directly following it (its
    /// visible descendants), then the dragged row alone is put back at `destination`, clamped
    /// to the end. Returns `None` if `dragged` is not in this snapshot.
    pub fn relocated(&self, dragged: NodeId, destination: usize) -> Option<Self> {
        let from = self.position(dragged)?;
        let depth = self.rows[from].depth;
        let span = self.rows[from + 1..]
            .iter()
            .take_while(|r| r.depth > depth)
            .count();

        let mut rows = Vec::with_capacity(self.rows.len() - span);
        rows.extend_from_slice(&self.rows[..from]);
        rows.extend_from_slice(&self.rows[from + 1 + span..]);
        let at = destination.min(rows.len());
        rows.insert(at, self.rows[from].clone());
        Some(Self::from_rows(rows))
    }
}
