// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for drag sessions over random outlines.
//!
//! 1. Any sequence of committed drags keeps single ownership and no cycles.
//! 2. A committed drop lands at the previewed depth and at the hovered row.
//! 3. Previewed depths stay inside the solved range.
//! 4. Re-querying with the same inputs gives the same answer.
//! 5. Cancelled drags leave the outline untouched.
//! 6. Removed subtrees never appear in the flattening.

use std::collections::BTreeSet;

use kurbo::Rect;
use proptest::prelude::*;
use proptest::sample::Index;
use understory_outline::{NodeId, Owner, Tree, TreeShape, flatten_subtree};
use understory_reorder::{DragSession, ReorderConfig};

// ── Helpers ─────────────────────────────────────────────────────────────

const CONTAINER: Rect = Rect::new(0.0, 0.0, 320.0, 640.0);

/// Each entry adds one node: top-level if the flag is set (or it is the first node),
/// otherwise under an earlier node picked by the index.
fn outline() -> impl Strategy<Value = Vec<(bool, Index)>> {
    proptest::collection::vec((any::<bool>(), any::<Index>()), 1..40)
}

/// (node to drag, destination row, anchor x, follow-up x)
fn drags() -> impl Strategy<Value = Vec<(Index, usize, f64, f64)>> {
    proptest::collection::vec(
        (any::<Index>(), 0_usize..50, 0.0_f64..320.0, -20.0_f64..340.0),
        1..12,
    )
}

fn build(layout: &[(bool, Index)]) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::empty();
    let mut ids: Vec<NodeId> = Vec::with_capacity(layout.len());
    for (top, pick) in layout {
        let parent = if *top || ids.is_empty() {
            None
        } else {
            Some(ids[pick.index(ids.len())])
        };
        ids.push(tree.insert(parent).unwrap());
    }
    (tree, ids)
}

fn config() -> ReorderConfig {
    ReorderConfig::default().with_max_depth(64)
}

fn check_forest(tree: &Tree) -> Result<(), TestCaseError> {
    let rows = tree.flatten_ids();
    prop_assert_eq!(rows.len(), tree.len(), "every node is reachable exactly once");
    let unique: BTreeSet<_> = rows.iter().copied().collect();
    prop_assert_eq!(unique.len(), rows.len());

    for &id in &rows {
        match tree.owner(id) {
            Some(Owner::TopLevel) => {
                let n = tree.top_level().iter().filter(|&&t| t == id).count();
                prop_assert_eq!(n, 1, "{:?} listed {} times at top level", id, n);
            }
            Some(Owner::Parent(p)) => {
                let n = tree.children(p).iter().filter(|&&c| c == id).count();
                prop_assert_eq!(n, 1, "{:?} listed {} times under {:?}", id, n, p);
            }
            other => prop_assert!(false, "{:?} has owner {:?}", id, other),
        }
        prop_assert!(tree.depth(id) < rows.len(), "ancestor walk of {:?} loops", id);
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–4. Committed drags
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn committed_drags_keep_the_forest_valid(layout in outline(), ops in drags()) {
        let (mut tree, ids) = build(&layout);
        for (pick, destination, x0, x1) in ops {
            let node = ids[pick.index(ids.len())];
            let mut drag = DragSession::begin(&mut tree, node, CONTAINER, config()).unwrap();
            let visible = tree.flatten_ids().len();

            let first = drag.update(&tree, destination, x0);
            let range = drag.range().unwrap();
            prop_assert!(range.contains(first), "{} outside {:?}", first, range);
            prop_assert_eq!(first, range.default_depth, "anchor maps to the default depth");

            let depth = drag.update(&tree, destination, x1);
            prop_assert!(range.contains(depth), "{} outside {:?}", depth, range);
            prop_assert_eq!(drag.update(&tree, destination, x1), depth);
            prop_assert_eq!(drag.range(), Some(range));

            drag.end(&mut tree, true).unwrap().unwrap();
            prop_assert_eq!(tree.depth(node), depth);
            let row = tree.flatten_ids().iter().position(|&id| id == node);
            prop_assert_eq!(row, Some(destination.min(visible - 1)));
            check_forest(&tree)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Cancel
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cancelled_drag_changes_nothing(layout in outline(), ops in drags()) {
        let (mut tree, ids) = build(&layout);
        let before = tree.flatten_ids();
        for (pick, destination, x0, x1) in ops {
            let node = ids[pick.index(ids.len())];
            let mut drag = DragSession::begin(&mut tree, node, CONTAINER, config()).unwrap();
            drag.update(&tree, destination, x0);
            drag.update(&tree, destination, x1);
            prop_assert_eq!(drag.end(&mut tree, false).unwrap(), None);
            prop_assert!(!tree.is_collapsed(node));
        }
        prop_assert_eq!(tree.flatten_ids(), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Removal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removed_subtree_is_not_flattened(layout in outline(), pick in any::<Index>()) {
        let (mut tree, ids) = build(&layout);
        let node = ids[pick.index(ids.len())];
        let gone: BTreeSet<_> = flatten_subtree(&tree, node).map(|row| row.id).collect();
        let before = tree.flatten_ids().len();

        tree.remove(node).unwrap();
        let rows = tree.flatten_ids();
        prop_assert_eq!(rows.len(), before - gone.len());
        prop_assert!(rows.iter().all(|id| !gone.contains(id)));
        prop_assert!(gone.iter().all(|&id| !tree.contains(id)));
        check_forest(&tree)?;
    }
}
