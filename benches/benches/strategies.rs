// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Apply and measure throughput of each strategy over flat child lists.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use trellis_benches::{children, strategies};
use trellis_layout::{ContainerFrame, LayoutStrategy, Padding, Rect};

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    let frame = ContainerFrame::new(Rect::new(0, 0, 1024, 768), Padding::all(8));
    for n in [8_u32, 64, 512] {
        let base = children(n);
        for layout in strategies(n) {
            group.bench_with_input(BenchmarkId::new(layout.name(), n), &n, |b, _| {
                let mut kids = base.clone();
                b.iter(|| {
                    layout.apply(black_box(frame), &mut kids);
                    black_box(&kids);
                });
            });
        }
    }
    group.finish();
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");
    for n in [8_u32, 64, 512] {
        let kids = children(n);
        for layout in strategies(n) {
            group.bench_with_input(BenchmarkId::new(layout.name(), n), &n, |b, _| {
                b.iter(|| black_box(layout.measure(Padding::all(8), black_box(&kids))));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_apply, bench_measure);
criterion_main!(benches);
