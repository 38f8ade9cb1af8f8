// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental update cost of nested containers: full relayout after a root
//! resize versus a single leaf change.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use trellis_benches::nested_tree;
use trellis_layout::Size;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_update");
    for (depth, fanout) in [(2_u32, 8_u32), (3, 6), (4, 4)] {
        let label = format!("{depth}x{fanout}");
        let (mut tree, root, leaves) = nested_tree(depth, fanout);
        tree.update(root);

        let mut wide = false;
        group.bench_function(BenchmarkId::new("root_resize", &label), |b| {
            b.iter(|| {
                wide = !wide;
                let width = if wide { 1440 } else { 1280 };
                tree.set_size(root, Size::new(width, 800));
                black_box(tree.update(root));
            });
        });

        let leaf = leaves[leaves.len() / 2];
        let mut grow = false;
        group.bench_function(BenchmarkId::new("leaf_resize", &label), |b| {
            b.iter(|| {
                grow = !grow;
                let width = if grow { 60 } else { 50 };
                tree.set_min_size(leaf, Size::new(width, 0));
                black_box(tree.update(root));
            });
        });

        group.bench_function(BenchmarkId::new("clean", &label), |b| {
            b.iter(|| black_box(tree.update(root)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
