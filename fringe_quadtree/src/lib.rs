// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fringe_quadtree --heading-base-level=0

//! Fringe Quadtree: a region quadtree engine for boundary scans.
//!
//! Fringe Quadtree is the spatial core of a Mandelbrot-boundary explorer. A
//! scan subdivides the complex plane into an implicit grid of square
//! regions; this crate records which regions the scan touched, compresses
//! the record into a canonical index, and answers queries against it.
//!
//! - [`VisitTree`]: the growable, mutable quadtree a scan writes into.
//!   Out-of-bounds writes grow coverage instead of failing.
//! - [`compress`]: one-shot canonicalization into a [`RegionIndex`] —
//!   uniform squares collapse, identical subtrees are hash-consed into one
//!   node, and interior/rejected regions fold to empty.
//! - [`QuadIndex::visible_areas`]: a viewport range query over the
//!   immutable index, with a mirrored pass that reconstructs the unscanned
//!   symmetric half-plane.
//! - [`diff`]: a lock-step structural comparison of two indices, producing
//!   a [`DiffIndex`] whose leaves encode what changed where.
//!
//! The scanning algorithm that drives the visitation tree lives in the
//! `fringe_scan` crate; per-region classifiers are a capability consumed
//! there. Each stage fully owns its tree: the scanner mutates a
//! [`VisitTree`], the compressor reads it once, and nothing mutates an
//! index after it is built.
//!
//! # Example
//!
//! ```rust
//! use fringe_quadtree::{RegionId, RegionType, VisitTree, compress};
//! use kurbo::Rect;
//!
//! // Record a few border regions, as a scan would.
//! let mut visits = VisitTree::new(3);
//! for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1)] {
//!     visits.visit(RegionId::new(x, y), RegionType::Border);
//! }
//! assert!(visits.has_visited(RegionId::new(2, 1)));
//!
//! // Freeze the scan into a canonical index and query it.
//! let index = compress(&visits);
//! let viewport = Rect::new(0.0, 0.0, 4.0, 4.0);
//! let areas = index.visible_areas(viewport, &[Rect::new(0.0, 0.0, 4.0, 8.0)]);
//! assert!(!areas.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod compress;
pub mod diff;
pub mod index;
pub mod node;
pub mod types;
pub mod view;
pub mod visit;

pub use compress::compress;
pub use diff::diff;
pub use index::{IndexBuilder, QuadIndex};
pub use node::{CanonNode, NodeKind, VisitNode};
pub use types::{DiffClass, NodeClass, QuadBounds, Quadrant, RegionClass, RegionId, RegionType};
pub use visit::VisitTree;

/// The compressed record of one boundary scan.
pub type RegionIndex = QuadIndex<RegionClass>;

/// The structural difference between two region indices.
pub type DiffIndex = QuadIndex<DiffClass>;
