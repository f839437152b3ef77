// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Outline: an arena-backed N-ary tree shown as a flat, indented list.
//!
//! Outline views (file browsers, task lists, layer panels) present a hierarchy as one row per
//! visible node, indented by depth. This crate owns that hierarchy and produces the rows.
//!
//! - [`Tree`] owns every node and an ordered top-level sequence (a forest).
//! - [`flatten`] walks any [`TreeShape`] in display order, skipping the descendants of
//!   collapsed nodes.
//! - [`Snapshot`] freezes a flattening into shape-only [`BareNode`] rows, so a caller can ask
//!   "what if this row moved there?" without touching the tree.
//!
//! Node payloads (labels, icons, row views) live outside the tree, keyed by [`NodeId`].
//!
//! ## Ownership
//!
//! Every node is held in exactly one place, recorded by its [`Owner`]: nowhere yet, the
//! top-level sequence, or one parent's children. Parent links are ids resolved through the
//! tree, and attaching a node under itself or one of its descendants fails with
//! [`TreeError::WouldCycle`].
//!
//! ## Building a tree
//!
//! Nodes can be wired up in a [`NodeArena`] first and then handed to [`Tree::new`] with the list
//! of top-level nodes. Construction is all-or-nothing: a stale, already-parented, or repeated
//! top-level entry yields [`TreeError::InvalidTreeConstruction`] and no tree.
//!
//! ```
//! use understory_outline::{NodeArena, Tree, TreeShape, flatten};
//!
//! let mut arena = NodeArena::new();
//! let inbox = arena.insert();
//! let today = arena.insert();
//! let later = arena.insert();
//! let archive = arena.insert();
//! arena.add_children(inbox, [today, later]).unwrap();
//!
//! let mut tree = Tree::new(arena, [inbox, archive]).unwrap();
//! let rows: Vec<_> = flatten(&tree).map(|r| (r.id, r.depth)).collect();
//! assert_eq!(rows, vec![(inbox, 0), (today, 1), (later, 1), (archive, 0)]);
//!
//! // Collapsing hides descendants from the rows but keeps the structure.
//! tree.set_collapsed(inbox, true).unwrap();
//! assert_eq!(tree.flatten_ids(), vec![inbox, archive]);
//! assert_eq!(tree.descendant_count(inbox), 2);
//!
//! // Moving preserves identity.
//! tree.move_node(later, Some(archive), 0).unwrap();
//! assert_eq!(tree.parent(later), Some(archive));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod shape;
mod snapshot;
mod tree;
mod types;

pub use error::{ConstructionFault, TreeError, TreeResult};
pub use shape::{Flatten, TreeShape, flatten, flatten_subtree};
pub use snapshot::{BareNode, Snapshot};
pub use tree::{NodeArena, Tree};
pub use types::{FlatNode, NodeFlags, NodeId, Owner};
