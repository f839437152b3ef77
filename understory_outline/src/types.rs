// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline: node identifiers, flags, and ownership.

/// Identifier for a node in an outline.
///
/// This is a small, copyable handle that stays stable while the node is alive,
/// including across moves to a different parent. It consists of a slot index and
/// a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale ids never alias a different live node because the generation must match.
/// Use [`NodeArena::contains`](crate::NodeArena::contains) or
/// [`TreeShape::contains`](crate::TreeShape::contains) to check liveness.
///
/// The ordering is by slot, then generation. It carries no structural meaning; it
/// exists so ids can key ordered maps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Per-node display and interaction flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Descendants are hidden from flattening; the subtree stays structurally intact.
        const COLLAPSED = 0b0000_0001;
        /// The node cannot be picked up by a drag.
        const DISABLED  = 0b0000_0010;
    }
}

/// Who holds a node in its children sequence.
///
/// A node is owned by exactly one of: nobody (freshly created or not yet attached),
/// the tree's top-level sequence, or a parent node.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Owner {
    /// Not attached anywhere.
    #[default]
    Detached,
    /// Listed in the tree's top-level sequence.
    TopLevel,
    /// Listed in the children of the given node.
    Parent(NodeId),
}

impl Owner {
    /// Returns the parent, if the owner is a node.
    #[inline]
    pub fn parent(self) -> Option<NodeId> {
        match self {
            Self::Parent(p) => Some(p),
            Self::Detached | Self::TopLevel => None,
        }
    }
}

/// One row of a flattened outline.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlatNode {
    /// The node shown on this row.
    pub id: NodeId,
    /// Number of ancestors; top-level nodes have depth `0`.
    pub depth: usize,
}
