// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scans the Mandelbrot boundary at a coarse resolution and prints an ASCII
//! map of the compressed index.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p fringe_demos --example boundary_scan`

use fringe_quadtree::{RegionClass, RegionId, RegionType, VisitTree, compress};
use fringe_scan::{RegionClassifier, scan_pair};
use kurbo::Rect;

/// Side of the region grid covering real coordinates `[-2, 2)`.
const GRID_SIDE: u32 = 128;
/// Escape-time iteration budget per sample point.
const MAX_ITERATIONS: u32 = 256;

/// A corner-sampling escape-time classifier.
///
/// Samples the four corners and the center of a region: if every sample
/// stays bounded the region is inside the set, and if every sample escapes
/// quickly the region is far outside; both are rejected. Disagreeing
/// samples straddle the boundary, and unanimous slow escapes are filaments.
#[derive(Clone)]
struct CornerClassifier {
    scale: f64,
    max_iterations: u32,
}

impl CornerClassifier {
    fn new() -> Self {
        Self {
            scale: 4.0 / f64::from(GRID_SIDE),
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Iterations until escape, or `None` if the point stays bounded.
    fn escape_time(&self, c_re: f64, c_im: f64) -> Option<u32> {
        let mut z_re = 0.0_f64;
        let mut z_im = 0.0_f64;
        for i in 0..self.max_iterations {
            let re2 = z_re * z_re;
            let im2 = z_im * z_im;
            if re2 + im2 > 4.0 {
                return Some(i);
            }
            z_im = 2.0 * z_re * z_im + c_im;
            z_re = re2 - im2 + c_re;
        }
        None
    }
}

impl RegionClassifier for CornerClassifier {
    fn classify(&mut self, region: RegionId) -> RegionType {
        let x0 = f64::from(region.x) * self.scale - 2.0;
        let y0 = f64::from(region.y) * self.scale;
        let half = self.scale / 2.0;
        let samples = [
            (x0, y0),
            (x0 + self.scale, y0),
            (x0, y0 + self.scale),
            (x0 + self.scale, y0 + self.scale),
            (x0 + half, y0 + half),
        ];

        let mut escaped = 0;
        let mut slowest = 0;
        for (re, im) in samples {
            match self.escape_time(re, im) {
                Some(iterations) => {
                    escaped += 1;
                    slowest = slowest.max(iterations);
                }
                None => {}
            }
        }
        if escaped == 0 {
            // Interior.
            RegionType::Rejected
        } else if escaped < samples.len() {
            RegionType::Border
        } else if slowest >= self.max_iterations / 8 {
            RegionType::Filament
        } else {
            RegionType::Rejected
        }
    }
}

fn main() {
    env_logger::init();

    // Seeds at the western tip (c = -2) and on the eastern boundary near
    // c = 0.25, so the two frontiers approach each other from both ends.
    let west = RegionId::new(0, 0);
    let east = RegionId::new((2.25 / 4.0 * f64::from(GRID_SIDE)) as u32, 0);

    let tree = scan_pair(
        VisitTree::new(3),
        [vec![west], vec![east]],
        [CornerClassifier::new(), CornerClassifier::new()],
    );

    let borders = tree.border_regions();
    println!(
        "visited tree: height {}, {} nodes, {} border regions",
        tree.height(),
        tree.node_count(),
        borders.len()
    );

    let index = compress(&tree);
    println!(
        "compressed index: {} node slots (for the same coverage)",
        index.node_count()
    );

    // Half a pixel per region; the dirty rect crops to the band around the
    // real axis where the set lives.
    let side = f64::from(GRID_SIDE) / 2.0;
    let viewport = Rect::new(0.0, 0.0, side, side);
    let dirty = Rect::new(0.0, side / 2.0, side, 3.0 * side / 2.0);
    let areas = index.visible_areas(viewport, &[dirty]);

    let width = side as usize;
    let top = (side / 2.0) as usize;
    let height = width;
    let mut canvas = vec![vec![' '; width]; height];
    for (rect, class) in areas {
        let glyph = match class {
            RegionClass::Border => '#',
            RegionClass::Filament => '.',
            RegionClass::Empty => ' ',
        };
        let x0 = rect.x0.max(0.0) as usize;
        let x1 = (rect.x1.ceil() as usize).min(width);
        let y0 = (rect.y0.max(0.0) as usize).saturating_sub(top);
        let y1 = ((rect.y1.ceil() as usize).min(top + height)).saturating_sub(top);
        for row in canvas.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = glyph;
            }
        }
    }
    for row in canvas {
        let line: String = row.into_iter().collect();
        println!("{line}");
    }
}
