// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline basics.
//!
//! Build a small outline, collapse a branch, move a node, and print the rows.
//! Labels are kept outside the tree, keyed by `NodeId`.
//!
//! Run:
//! - `cargo run -p understory_demos --example outline_basics`

use std::collections::BTreeMap;

use understory_outline::{NodeArena, NodeId, Tree, TreeShape, flatten};

fn print_rows(title: &str, tree: &Tree, labels: &BTreeMap<NodeId, &str>) {
    println!("== {title} ==");
    for row in flatten(tree) {
        let marker = match (tree.has_children(row.id), tree.is_collapsed(row.id)) {
            (false, _) => ' ',
            (true, false) => 'v',
            (true, true) => '>',
        };
        let label = labels.get(&row.id).copied().unwrap_or("?");
        println!("  {}{marker} {label}", "    ".repeat(row.depth));
    }
}

fn main() {
    let mut arena = NodeArena::new();
    let mut labels = BTreeMap::new();
    let mut node = |label| {
        let id = arena.insert();
        labels.insert(id, label);
        id
    };
    let projects = node("Projects");
    let garden = node("Garden");
    let seeds = node("Order seeds");
    let beds = node("Build raised beds");
    let house = node("House");
    let gutters = node("Clean gutters");
    let inbox = node("Inbox");

    arena.add_children(projects, [garden, house]).unwrap();
    arena.add_children(garden, [seeds, beds]).unwrap();
    arena.add_child(house, gutters, None).unwrap();
    let mut tree = Tree::new(arena, [inbox, projects]).unwrap();
    print_rows("Initial", &tree, &labels);

    tree.set_collapsed(garden, true).unwrap();
    print_rows("Garden collapsed", &tree, &labels);
    println!(
        "  Garden still holds {} tasks; Projects is {} levels tall",
        tree.descendant_count(garden),
        tree.subtree_height(projects)
    );

    // Move "Clean gutters" into the inbox; identity is preserved.
    let old = tree.move_node(gutters, Some(inbox), 0).unwrap();
    assert_eq!(old, Some(house));
    print_rows("Gutters moved to Inbox", &tree, &labels);

    // Building a tree from an already-parented node fails and builds nothing.
    let mut arena = NodeArena::new();
    let a = arena.insert();
    let b = arena.insert();
    arena.add_child(a, b, None).unwrap();
    match Tree::new(arena, [a, b]) {
        Ok(_) => unreachable!("b has a parent"),
        Err(err) => println!("== Invalid construction ==\n  {err}"),
    }
}
