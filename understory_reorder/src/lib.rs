// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Reorder: drag-and-drop reparenting for flattened outlines.
//!
//! An outline shows a tree as one indented row per visible node. Dragging a row vertically picks
//! a new position in that list, and dragging sideways picks how deep the row sits there: its new
//! parent. This crate answers "which depths are legal here?", maps the pointer's x to one of
//! them, and performs the single structural move on drop.
//!
//! - [`solve`] computes the [`DepthRange`] for a row at a tentative position.
//! - [`DepthBands`] lays out one horizontal [`Band`] per reachable depth around the pointer.
//! - [`commit_move`] turns a position and depth into a parent and child index, checks it, and
//!   moves the node. It reports what to redraw as an [`Invalidation`].
//! - [`DragSession`] wires these into a begin / update / end protocol.
//!
//! Speculative queries work on [`Snapshot`](understory_outline::Snapshot)s and only borrow the
//! tree immutably; the tree changes once, on drop.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_outline::{NodeArena, Tree, TreeShape};
//! use understory_reorder::{DragSession, ReorderConfig};
//!
//! //  A
//! //  ├── B
//! //  │   ├── B1
//! //  │   └── B2
//! //  └── C
//! //      ├── C1
//! //      └── C2
//! let mut arena = NodeArena::new();
//! let [a, b, b1, b2, c, c1, c2] = [(); 7].map(|()| arena.insert());
//! arena.add_children(a, [b, c]).unwrap();
//! arena.add_children(b, [b1, b2]).unwrap();
//! arena.add_children(c, [c1, c2]).unwrap();
//! let mut tree = Tree::new(arena, [a]).unwrap();
//!
//! let list = Rect::new(0.0, 0.0, 320.0, 480.0);
//! let mut drag = DragSession::begin(&mut tree, b2, list, ReorderConfig::default()).unwrap();
//!
//! // Hover B2 between C and C1: it can only become C's first child.
//! let depth = drag.update(&tree, 4, 120.0);
//! assert_eq!(depth, 2);
//!
//! let changed = drag.end(&mut tree, true).unwrap().unwrap();
//! assert_eq!(changed.new_parent, Some(c));
//! assert_eq!(tree.children(c), &[b2, c1, c2]);
//! ```
//!
//! ## Logging
//!
//! Sessions and commits emit [`tracing`] events: `debug` for begin, commit, and cancel,
//! `trace` when bands are laid out, and `warn` when a query degrades or a drop is rejected.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bands;
mod commit;
mod config;
mod error;
mod session;
mod solver;

pub use bands::{Band, DepthBands};
pub use commit::{Invalidation, commit_move};
pub use config::ReorderConfig;
pub use error::ReorderError;
pub use session::DragSession;
pub use solver::{DepthRange, ParentSlot, find_parent_slot, least_possible_depth, solve};
