// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fringe_scan --heading-base-level=0

//! Fringe Scan: the frontier-driven boundary scanner.
//!
//! Fringe Scan walks outward from seed regions along the boundary of the
//! Mandelbrot set, consulting a pluggable [`RegionClassifier`] for each
//! region and recording the results in a
//! [`VisitTree`](fringe_quadtree::VisitTree).
//!
//! - [`Scanner`]: the FIFO flood fill. Expands non-rejected regions to their
//!   8-connected neighbors, gated so nothing is classified twice and clipped
//!   to the scanned half-plane.
//! - [`CancelToken`]: cooperative cancellation, polled once per dequeued
//!   region. A cancelled scan is valid and resumable, not an error.
//! - [`SharedVisits`] and [`scan_pair`]: the two-worker variant. Both
//!   workers share one mutex-guarded tree; the worker that discovers the
//!   frontiers have met cancels itself, and its leftover queue is drained
//!   sequentially afterward so coverage never suffers.
//!
//! The classification of a region is up to the caller: classifiers
//! typically iterate Mandelbrot sample points, but any rule that partitions
//! regions into border, filament, and rejected drives the scan the same
//! way.
//!
//! # Example
//!
//! ```rust
//! use fringe_quadtree::{RegionId, RegionType, VisitTree};
//! use fringe_scan::{RegionClassifier, ScanOutcome, Scanner};
//!
//! /// Classifies a small diamond outline as border.
//! struct Diamond;
//!
//! impl RegionClassifier for Diamond {
//!     fn classify(&mut self, region: RegionId) -> RegionType {
//!         let d = region.x.abs_diff(4) + region.y.abs_diff(4);
//!         if d == 3 {
//!             RegionType::Border
//!         } else {
//!             RegionType::Rejected
//!         }
//!     }
//! }
//!
//! let mut tree = VisitTree::new(3);
//! let mut scanner = Scanner::new(&mut tree, Diamond);
//! scanner.push_seed(RegionId::new(7, 4));
//! assert_eq!(scanner.run(), ScanOutcome::Completed);
//! drop(scanner);
//! assert_eq!(tree.border_regions().len(), 12);
//! ```

pub mod scanner;
pub mod shared;
pub mod types;

pub use scanner::{Scanner, VisitLog};
pub use shared::{SharedVisits, scan_pair};
pub use types::{CancelToken, RegionClassifier, ScanOutcome};
