// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanner-facing types: the classifier capability, cancellation, and scan
//! outcomes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fringe_quadtree::{RegionId, RegionType};

/// Decides what a region is, typically by iterating sample points of the
/// Mandelbrot sequence inside it.
///
/// Implementations must return [`RegionType::Border`],
/// [`RegionType::Filament`], or [`RegionType::Rejected`] — never
/// [`RegionType::Unknown`], which is reserved for unvisited space. They may
/// be internally parallel, and must be `Send` when used with
/// [`scan_pair`](crate::scan_pair); each worker owns its own instance.
pub trait RegionClassifier {
    /// Classify one region.
    fn classify(&mut self, region: RegionId) -> RegionType;
}

/// Cooperative cancellation flag shared between a scanner and whoever may
/// stop it.
///
/// Cancellation is a signal, not an error: a cancelled scan returns
/// [`ScanOutcome::Cancelled`] with its visitation tree in a valid,
/// partially-scanned state and its queue intact, so the caller can resume,
/// drain, or discard it. The flag is polled once per dequeued region, so
/// cancellation is prompt but never preemptive.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, unsignalled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How a scan run ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScanOutcome {
    /// The work queue drained.
    Completed,
    /// The cancellation token was observed between pops.
    Cancelled,
}
