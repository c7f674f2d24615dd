// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fringe_quadtree::{DiffClass, RegionId, RegionType, VisitTree, compress, diff};
use kurbo::Rect;

/// Cells of an annulus in the quarter-plane, the shape a boundary scan
/// leaves behind.
fn ring_cells(center: i64, r_min: i64, r_max: i64) -> Vec<RegionId> {
    let mut out = Vec::new();
    for x in 0..=(center + r_max) {
        for y in 0..=(center + r_max) {
            let dx = x - center;
            let dy = y - center;
            let d2 = dx * dx + dy * dy;
            if d2 >= r_min * r_min && d2 <= r_max * r_max {
                out.push(RegionId::new(x as u32, y as u32));
            }
        }
    }
    out
}

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
}

fn shuffled(mut cells: Vec<RegionId>, seed: u64) -> Vec<RegionId> {
    let mut rng = Rng::new(seed);
    for i in (1..cells.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        cells.swap(i, j);
    }
    cells
}

fn filled_tree(cells: &[RegionId]) -> VisitTree {
    let mut tree = VisitTree::new(3);
    for &cell in cells {
        tree.visit(cell, RegionType::Border);
    }
    tree
}

fn bench_visit(c: &mut Criterion) {
    let cells = shuffled(ring_cells(60, 48, 52), 0xCAFE_F00D_DEAD_BEEF);
    let mut group = c.benchmark_group("visit");
    group.throughput(Throughput::Elements(cells.len() as u64));
    group.bench_function("ring_shuffled", |b| {
        b.iter_batched(
            || VisitTree::new(3),
            |mut tree| {
                for &cell in &cells {
                    tree.visit(cell, RegionType::Border);
                }
                tree
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_has_visited(c: &mut Criterion) {
    let cells = ring_cells(60, 48, 52);
    let tree = filled_tree(&cells);
    let probes = shuffled(ring_cells(60, 40, 56), 0x5EED);
    let mut group = c.benchmark_group("has_visited");
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("ring_probe", |b| {
        b.iter(|| {
            let mut hits = 0_u64;
            for &probe in &probes {
                hits += u64::from(tree.has_visited(probe));
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_compress(c: &mut Criterion) {
    let tree = filled_tree(&ring_cells(60, 48, 52));
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Elements(tree.node_count() as u64));
    group.bench_function("ring", |b| b.iter(|| compress(black_box(&tree))));
    group.finish();
}

fn bench_visible_areas(c: &mut Criterion) {
    let index = compress(&filled_tree(&ring_cells(60, 48, 52)));
    let viewport = Rect::new(0.0, 0.0, 512.0, 512.0);
    let full = Rect::new(0.0, 0.0, 512.0, 1024.0);
    let quarter = Rect::new(128.0, 384.0, 384.0, 640.0);
    let mut group = c.benchmark_group("visible_areas");
    group.bench_function("full_viewport", |b| {
        b.iter(|| index.visible_areas(black_box(viewport), &[full]));
    });
    group.bench_function("dirty_quarter", |b| {
        b.iter(|| index.visible_areas(black_box(viewport), &[quarter]));
    });
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let before = compress(&filled_tree(&ring_cells(60, 48, 52)));
    let after = compress(&filled_tree(&ring_cells(60, 47, 53)));
    let mut group = c.benchmark_group("diff");
    group.bench_function("nearby_rings", |b| {
        b.iter(|| diff(black_box(&before), black_box(&after)));
    });
    group.bench_function("identity", |b| {
        b.iter(|| {
            let delta = diff(black_box(&before), black_box(&before));
            debug_assert_eq!(delta.root().class::<DiffClass>(), DiffClass::Empty);
            delta
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_visit,
    bench_has_visited,
    bench_compress,
    bench_visible_areas,
    bench_diff
);
criterion_main!(benches);
