// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frontier scan: a FIFO flood fill outward from seed regions.

use std::collections::VecDeque;

use fringe_quadtree::{RegionId, RegionType, VisitTree};
use log::debug;

use crate::types::{CancelToken, RegionClassifier, ScanOutcome};

/// Where a scanner records visits.
///
/// The seam between the scan algorithm and the tree it writes: a plain
/// [`VisitTree`] for a single-threaded scan, or a
/// [`SharedVisits`](crate::SharedVisits) proxy when two workers share one
/// tree.
pub trait VisitLog {
    /// Whether the region has already been classified.
    fn has_visited(&self, region: RegionId) -> bool;

    /// Record a classification.
    ///
    /// Returns false when the region had already been recorded by another
    /// worker; the caller should then treat the region as someone else's and
    /// skip its neighbor expansion.
    fn record(&mut self, region: RegionId, class: RegionType) -> bool;
}

impl VisitLog for VisitTree {
    fn has_visited(&self, region: RegionId) -> bool {
        Self::has_visited(self, region)
    }

    fn record(&mut self, region: RegionId, class: RegionType) -> bool {
        self.visit(region, class);
        true
    }
}

impl<T: VisitLog + ?Sized> VisitLog for &mut T {
    fn has_visited(&self, region: RegionId) -> bool {
        T::has_visited(self, region)
    }

    fn record(&mut self, region: RegionId, class: RegionType) -> bool {
        T::record(self, region, class)
    }
}

/// A frontier scan over the implicit region grid.
///
/// Pops a region, skips it if already visited, classifies it, records the
/// result, and — unless the region was rejected — enqueues its 8-connected
/// neighbors. The scanned half-plane is bounded below and to the left, so
/// southern neighbors are suppressed at `y == 0` and western ones at
/// `x == 0`. Every pop is gated by [`VisitLog::has_visited`], so no region
/// is processed twice and the fill terminates at the rejected rim.
///
/// The *set* of regions a completed scan visits depends only on the seeds
/// and the classifier; queue order shapes tree growth, not final content.
pub struct Scanner<V, C> {
    visits: V,
    classifier: C,
    queue: VecDeque<RegionId>,
    cancel: CancelToken,
}

impl<V: VisitLog, C: RegionClassifier> Scanner<V, C> {
    /// Create a scanner with a private cancellation token.
    pub fn new(visits: V, classifier: C) -> Self {
        Self::with_cancel(visits, classifier, CancelToken::new())
    }

    /// Create a scanner observing an externally held cancellation token.
    pub fn with_cancel(visits: V, classifier: C, cancel: CancelToken) -> Self {
        Self {
            visits,
            classifier,
            queue: VecDeque::new(),
            cancel,
        }
    }

    /// Enqueue a starting region. Seeds should sit on the known boundary.
    pub fn push_seed(&mut self, region: RegionId) {
        self.queue.push_back(region);
    }

    /// Run until the queue drains or cancellation is observed.
    ///
    /// Cancellation is polled once per iteration, before the pop. A
    /// cancelled scanner keeps its remaining queue; see
    /// [`into_parts`](Self::into_parts).
    pub fn run(&mut self) -> ScanOutcome {
        let mut visited = 0_u64;
        loop {
            if self.cancel.is_cancelled() {
                debug!(
                    "scan cancelled after {visited} visits, {} regions still queued",
                    self.queue.len()
                );
                return ScanOutcome::Cancelled;
            }
            let Some(region) = self.queue.pop_front() else {
                debug!("scan completed after {visited} visits");
                return ScanOutcome::Completed;
            };
            if self.visits.has_visited(region) {
                continue;
            }
            let class = self.classifier.classify(region);
            debug_assert!(
                class != RegionType::Unknown,
                "classifier returned Unknown"
            );
            if !self.visits.record(region, class) {
                continue;
            }
            visited += 1;
            if class != RegionType::Rejected {
                self.push_neighbors(region);
            }
        }
    }

    /// Disassemble into the visit log, the classifier, and whatever is left
    /// of the queue.
    pub fn into_parts(self) -> (V, C, VecDeque<RegionId>) {
        (self.visits, self.classifier, self.queue)
    }

    /// Enqueue the 8-connected neighbors that exist in the scanned
    /// half-plane, clockwise from north.
    fn push_neighbors(&mut self, region: RegionId) {
        let RegionId { x, y } = region;
        self.queue.push_back(region.north());
        self.queue.push_back(region.north_east());
        self.queue.push_back(region.east());
        if y >= 1 {
            self.queue.push_back(region.south_east());
            self.queue.push_back(region.south());
        }
        if x >= 1 && y >= 1 {
            self.queue.push_back(region.south_west());
        }
        if x >= 1 {
            self.queue.push_back(region.west());
            self.queue.push_back(region.north_west());
        }
    }
}

impl<V, C> core::fmt::Debug for Scanner<V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scanner")
            .field("queued", &self.queue.len())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
