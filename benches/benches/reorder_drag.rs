// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_outline::{NodeId, Snapshot, Tree};
use understory_reorder::{DepthBands, DragSession, ReorderConfig, commit_move, solve};

const CONTAINER: Rect = Rect::new(0.0, 0.0, 480.0, 2_000.0);

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

fn gen_random(n: usize) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::empty();
    let mut ids = Vec::with_capacity(n);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
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

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for &n in &[1_000usize, 10_000] {
        let (tree, ids) = gen_random(n);
        let dragged = ids[n / 2];
        let order = Snapshot::capture(&tree)
            .relocated(dragged, n / 4)
            .unwrap();
        group.bench_function(format!("range_n{}", n), |b| {
            b.iter(|| black_box(solve(&order, &tree, dragged)));
        });
        let range = solve(&order, &tree, dragged).unwrap();
        group.bench_function(format!("bands_n{}", n), |b| {
            b.iter(|| {
                let bands = DepthBands::new(range, 240.0, 15.0, CONTAINER, 64);
                black_box(bands.resolve(black_box(200.0)))
            });
        });
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let (tree, ids) = gen_random(5_000);
    let config = ReorderConfig::default().with_max_depth(usize::MAX);

    // Pointer sweeps sideways over one destination, then across many destinations.
    group.bench_function("update_sweep_n5000", |b| {
        b.iter_batched(
            || {
                let mut tree = tree.clone();
                let drag = DragSession::begin(&mut tree, ids[2_500], CONTAINER, config).unwrap();
                (tree, drag)
            },
            |(tree, mut drag)| {
                for step in 0..64 {
                    let x = 100.0 + step as f64 * 3.0;
                    black_box(drag.update(&tree, 1_000 + step / 8, x));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("commit_n5000", |b| {
        b.iter_batched(
            || {
                let tree = tree.clone();
                let order = Snapshot::capture(&tree).relocated(ids[4_000], 10).unwrap();
                let depth = solve(&order, &tree, ids[4_000]).unwrap().default_depth;
                (tree, order, depth)
            },
            |(mut tree, order, depth)| {
                black_box(commit_move(&mut tree, &order, ids[4_000], depth, &config)).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_solve, bench_session);
criterion_main!(benches);
