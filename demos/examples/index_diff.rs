// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diffs the compressed indices of two scans run at different iteration
//! budgets and summarizes what changed.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p fringe_demos --example index_diff`

use fringe_quadtree::{
    DiffClass, DiffIndex, RegionId, RegionIndex, RegionType, VisitTree, compress, diff,
};
use fringe_scan::{RegionClassifier, Scanner};
use kurbo::Rect;
use log::info;

const GRID_SIDE: u32 = 64;

/// Corner-sampling escape-time classifier with a configurable budget.
///
/// Deliberately cruder than a production classifier: the point is that two
/// budgets disagree near the boundary, which is what the diff makes visible.
struct BudgetClassifier {
    scale: f64,
    max_iterations: u32,
}

impl BudgetClassifier {
    fn new(max_iterations: u32) -> Self {
        Self {
            scale: 4.0 / f64::from(GRID_SIDE),
            max_iterations,
        }
    }
}

impl RegionClassifier for BudgetClassifier {
    fn classify(&mut self, region: RegionId) -> RegionType {
        let corners = [
            (f64::from(region.x), f64::from(region.y)),
            (f64::from(region.x + 1), f64::from(region.y)),
            (f64::from(region.x), f64::from(region.y + 1)),
            (f64::from(region.x + 1), f64::from(region.y + 1)),
        ];
        let mut escaped = 0;
        let mut slowest = 0;
        for (gx, gy) in corners {
            let c_re = gx * self.scale - 2.0;
            let c_im = gy * self.scale;
            let mut z_re = 0.0_f64;
            let mut z_im = 0.0_f64;
            let mut time = None;
            for i in 0..self.max_iterations {
                let re2 = z_re * z_re;
                let im2 = z_im * z_im;
                if re2 + im2 > 4.0 {
                    time = Some(i);
                    break;
                }
                z_im = 2.0 * z_re * z_im + c_im;
                z_re = re2 - im2 + c_re;
            }
            if let Some(i) = time {
                escaped += 1;
                slowest = slowest.max(i);
            }
        }
        if escaped == 0 {
            RegionType::Rejected
        } else if escaped < corners.len() {
            RegionType::Border
        } else if slowest >= self.max_iterations / 8 {
            RegionType::Filament
        } else {
            RegionType::Rejected
        }
    }
}

fn scan_index(max_iterations: u32) -> RegionIndex {
    let mut tree = VisitTree::new(3);
    let mut scanner = Scanner::new(&mut tree, BudgetClassifier::new(max_iterations));
    scanner.push_seed(RegionId::new(0, 0));
    scanner.run();
    drop(scanner);
    info!(
        "scan at {max_iterations} iterations: {} border regions",
        tree.border_regions().len()
    );
    compress(&tree)
}

fn transition_counts(delta: &DiffIndex) -> [usize; 8] {
    let side = f64::from(1_u32 << (delta.height() - 1));
    let viewport = Rect::new(0.0, 0.0, side, side);
    let everything = Rect::new(0.0, 0.0, side, 2.0 * side);
    let mut counts = [0_usize; 8];
    for (_, class) in delta.visible_areas(viewport, &[everything]) {
        counts[class as usize] += 1;
    }
    counts
}

fn main() {
    env_logger::init();

    let coarse = scan_index(48);
    let fine = scan_index(384);
    println!(
        "coarse index: {} node slots, fine index: {} node slots",
        coarse.node_count(),
        fine.node_count()
    );

    let delta = diff(&coarse, &fine);
    println!("diff index: {} node slots", delta.node_count());

    let counts = transition_counts(&delta);
    let labels = [
        (DiffClass::EmptyToBorder, "empty -> border"),
        (DiffClass::EmptyToFilament, "empty -> filament"),
        (DiffClass::BorderToEmpty, "border -> empty"),
        (DiffClass::BorderToFilament, "border -> filament"),
        (DiffClass::FilamentToEmpty, "filament -> empty"),
        (DiffClass::FilamentToBorder, "filament -> border"),
    ];
    for (class, label) in labels {
        println!("{label:>20}: {} areas", counts[class as usize]);
    }

    // Sanity: an index never differs from itself.
    let identity = diff(&fine, &fine);
    assert_eq!(identity.node_count(), 0);
    println!("diff(fine, fine) collapses to a single empty leaf");
}
