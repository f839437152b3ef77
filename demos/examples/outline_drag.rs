// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline drag-and-drop.
//!
//! Replays a scripted drag: pick up a row, hover a few destinations while moving the pointer
//! sideways, and drop. Set `RUST_LOG=understory_reorder=trace` to see the session's events.
//!
//! Run:
//! - `cargo run -p understory_demos --example outline_drag`

use std::collections::BTreeMap;

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_outline::{NodeArena, NodeId, Tree, flatten};
use understory_reorder::{DragSession, ReorderConfig};

fn print_rows(title: &str, tree: &Tree, labels: &BTreeMap<NodeId, &str>) {
    println!("== {title} ==");
    for row in flatten(tree) {
        let label = labels.get(&row.id).copied().unwrap_or("?");
        println!("  {}{label}", "  ".repeat(row.depth));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    //  A
    //  ├── B
    //  │   ├── B1
    //  │   └── B2
    //  └── C
    //      ├── C1
    //      └── C2
    let mut arena = NodeArena::new();
    let mut labels = BTreeMap::new();
    let mut node = |label| {
        let id = arena.insert();
        labels.insert(id, label);
        id
    };
    let [a, b, b1, b2, c, c1, c2] = ["A", "B", "B1", "B2", "C", "C1", "C2"].map(&mut node);
    arena.add_children(a, [b, c]).unwrap();
    arena.add_children(b, [b1, b2]).unwrap();
    arena.add_children(c, [c1, c2]).unwrap();
    let mut tree = Tree::new(arena, [a]).unwrap();
    print_rows("Initial", &tree, &labels);

    let list = Rect::new(0.0, 0.0, 320.0, 480.0);
    let config = ReorderConfig::default();

    // Drag B2 to the very end, then slide left to make it top-level.
    let mut drag = DragSession::begin(&mut tree, b2, list, config).unwrap();
    for (destination, x) in [(5, 160.0), (6, 160.0), (6, 145.0), (6, 130.0), (6, 20.0)] {
        let depth = drag.update(&tree, destination, x);
        println!(
            "  hover row {destination} at x={x:>5.1}: depth {depth} (range {:?})",
            drag.range()
        );
    }
    let changed = drag.end(&mut tree, true).unwrap();
    println!("  redraw: {:?}", changed.map(|inv| inv.nodes().collect::<Vec<_>>()));
    print_rows("B2 dropped at top level", &tree, &labels);

    // Drag C between A and B, nudged right past the default band: no deeper level exists
    // there, so the pointer beyond the last band keeps the default.
    let mut drag = DragSession::begin(&mut tree, c, list, config).unwrap();
    let depth = drag.update(&tree, 1, 100.0);
    let held = drag.update(&tree, 1, 300.0);
    assert_eq!(depth, held);
    drag.end(&mut tree, true).unwrap();
    print_rows("C dropped as A's first child", &tree, &labels);

    // Cancelling leaves the outline untouched.
    let before = tree.flatten_ids();
    let mut drag = DragSession::begin(&mut tree, b, list, config).unwrap();
    drag.update(&tree, 0, 50.0);
    drag.end(&mut tree, false).unwrap();
    assert_eq!(tree.flatten_ids(), before);
    println!("== Cancelled drag left {} rows unchanged ==", before.len());
}
