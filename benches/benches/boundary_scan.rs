// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use fringe_quadtree::{RegionId, RegionType, VisitTree};
use fringe_scan::{RegionClassifier, Scanner, scan_pair};

/// Border ring in the quarter-plane; the boundary shape without the cost of
/// a real escape-time kernel.
#[derive(Clone)]
struct RingClassifier {
    center: i64,
    r2_min: i64,
    r2_max: i64,
}

impl RingClassifier {
    fn new(center: i64, r_min: i64, r_max: i64) -> Self {
        Self {
            center,
            r2_min: r_min * r_min,
            r2_max: r_max * r_max,
        }
    }
}

impl RegionClassifier for RingClassifier {
    fn classify(&mut self, region: RegionId) -> RegionType {
        let dx = i64::from(region.x) - self.center;
        let dy = i64::from(region.y) - self.center;
        let d2 = dx * dx + dy * dy;
        if d2 >= self.r2_min && d2 <= self.r2_max {
            RegionType::Border
        } else {
            RegionType::Rejected
        }
    }
}

fn bench_single_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.bench_function("single_ring", |b| {
        b.iter_batched(
            || VisitTree::new(3),
            |mut tree| {
                let mut scanner = Scanner::new(&mut tree, RingClassifier::new(60, 48, 52));
                scanner.push_seed(RegionId::new(112, 60));
                scanner.run();
                drop(scanner);
                tree
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_pair_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(20);
    group.bench_function("pair_ring", |b| {
        b.iter_batched(
            || VisitTree::new(3),
            |tree| {
                scan_pair(
                    tree,
                    [vec![RegionId::new(112, 60)], vec![RegionId::new(8, 60)]],
                    [
                        RingClassifier::new(60, 48, 52),
                        RingClassifier::new(60, 48, 52),
                    ],
                )
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_single_scan, bench_pair_scan);
criterion_main!(benches);
