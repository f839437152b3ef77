// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_outline::{NodeId, Snapshot, Tree, TreeShape, flatten};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// `groups` top-level nodes with `per_group` leaves each.
fn gen_wide(groups: usize, per_group: usize) -> Tree {
    let mut tree = Tree::empty();
    for _ in 0..groups {
        let g = tree.insert(None).unwrap();
        for _ in 0..per_group {
            let _ = tree.insert(Some(g)).unwrap();
        }
    }
    tree
}

/// A single chain `n` levels deep.
fn gen_deep(n: usize) -> Tree {
    let mut tree = Tree::empty();
    let mut parent = None;
    for _ in 0..n {
        parent = Some(tree.insert(parent).unwrap());
    }
    tree
}

/// Every node attaches under a random earlier node; roughly one in eight is top-level.
fn gen_random(n: usize) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::empty();
    let mut ids = Vec::with_capacity(n);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..n {
        let parent = if ids.is_empty() || rng.below(8) == 0 {
            None
        } else {
            Some(ids[rng.below(ids.len())])
        };
        ids.push(tree.insert(parent).unwrap());
    }
    (tree, ids)
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    for &n in &[1_000usize, 10_000, 100_000] {
        let (tree, _) = gen_random(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("random_n{}", n), |b| {
            b.iter(|| black_box(flatten(&tree).count()));
        });
    }

    let tree = gen_wide(1_000, 10);
    group.throughput(Throughput::Elements(11_000));
    group.bench_function("wide_1000x10", |b| {
        b.iter(|| black_box(tree.flatten_ids()));
    });

    let tree = gen_deep(10_000);
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("deep_10000", |b| {
        b.iter(|| black_box(flatten(&tree).map(|row| row.depth).max()));
    });
    group.finish();
}

fn bench_collapsed(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_collapsed");
    let (mut tree, ids) = gen_random(10_000);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    for _ in 0..200 {
        let id = ids[rng.below(ids.len())];
        let _ = tree.set_collapsed(id, true);
    }
    group.bench_function("random_n10000_200_collapsed", |b| {
        b.iter(|| black_box(flatten(&tree).count()));
    });
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for &n in &[1_000usize, 10_000] {
        let (tree, ids) = gen_random(n);
        let snap = Snapshot::capture(&tree);
        let dragged = ids[n / 2];
        group.bench_function(format!("capture_n{}", n), |b| {
            b.iter(|| black_box(Snapshot::capture(&tree).len()));
        });
        group.bench_function(format!("relocated_n{}", n), |b| {
            b.iter(|| black_box(snap.relocated(dragged, n / 3).map(|s| s.len())));
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let tree = gen_deep(10_000);
    let root = tree.top_level()[0];
    let leaf = tree.flatten_ids().last().copied().unwrap();
    group.bench_function("deep_depth_of_leaf", |b| {
        b.iter(|| black_box(tree.depth(leaf)));
    });
    group.bench_function("deep_subtree_height", |b| {
        b.iter(|| black_box(tree.subtree_height(root)));
    });
    group.bench_function("deep_descendant_count", |b| {
        b.iter(|| black_box(tree.descendant_count(root)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_flatten,
    bench_collapsed,
    bench_snapshot,
    bench_queries
);
criterion_main!(benches);
