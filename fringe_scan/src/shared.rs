// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-worker concurrent scanning over one shared visitation tree.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use fringe_quadtree::{RegionId, RegionType, VisitTree};
use log::debug;

use crate::scanner::{Scanner, VisitLog};
use crate::types::{CancelToken, RegionClassifier, ScanOutcome};

/// A visit log shared between two scan workers.
///
/// All tree access goes through one mutex, held only for the duration of a
/// single call. [`record`](VisitLog::record) is the collision detector: a
/// region that is already visited at record time was taken by the other
/// worker, which means the two frontiers have met and this worker's
/// remaining work is redundant. The proxy then cancels its own worker's
/// token and reports the record as lost, rather than raising an error.
#[derive(Clone, Debug)]
pub struct SharedVisits {
    tree: Arc<Mutex<VisitTree>>,
    cancel: CancelToken,
}

impl SharedVisits {
    /// Wrap a shared tree for one worker, linking the worker's token.
    pub fn new(tree: Arc<Mutex<VisitTree>>, cancel: CancelToken) -> Self {
        Self { tree, cancel }
    }

    fn lock(&self) -> MutexGuard<'_, VisitTree> {
        // A worker panic surfaces at join; the tree itself is kept valid by
        // `visit`, so the poison flag carries no extra information.
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VisitLog for SharedVisits {
    fn has_visited(&self, region: RegionId) -> bool {
        self.lock().has_visited(region)
    }

    fn record(&mut self, region: RegionId, class: RegionType) -> bool {
        let mut tree = self.lock();
        if tree.has_visited(region) {
            drop(tree);
            debug!("frontier collision at ({}, {})", region.x, region.y);
            self.cancel.cancel();
            false
        } else {
            tree.visit(region, class);
            true
        }
    }
}

/// Scan two frontiers concurrently into one visitation tree.
///
/// Each worker runs a [`Scanner`] on its own thread with its own seeds and
/// classifier against the shared tree. When the frontiers meet, the worker
/// that observes the collision cancels itself; the sibling completes its own
/// frontier undisturbed. Whatever the cancelled worker left queued is then
/// drained by a sequential scan under no contention, so coverage is exactly
/// that of a single-threaded scan over the same seeds.
///
/// This is collision detection, not work stealing: a small amount of
/// boundary work near the meeting line is classified twice.
pub fn scan_pair<C>(
    tree: VisitTree,
    seeds: [Vec<RegionId>; 2],
    classifiers: [C; 2],
) -> VisitTree
where
    C: RegionClassifier + Send,
{
    let shared = Arc::new(Mutex::new(tree));
    let [seeds_a, seeds_b] = seeds;
    let [classifier_a, classifier_b] = classifiers;
    let token_a = CancelToken::new();
    let token_b = CancelToken::new();

    let mut worker_a = Scanner::with_cancel(
        SharedVisits::new(Arc::clone(&shared), token_a.clone()),
        classifier_a,
        token_a,
    );
    for seed in seeds_a {
        worker_a.push_seed(seed);
    }
    let mut worker_b = Scanner::with_cancel(
        SharedVisits::new(Arc::clone(&shared), token_b.clone()),
        classifier_b,
        token_b,
    );
    for seed in seeds_b {
        worker_b.push_seed(seed);
    }

    let (outcome_a, outcome_b) = thread::scope(|scope| {
        let handle_a = scope.spawn(|| worker_a.run());
        let handle_b = scope.spawn(|| worker_b.run());
        (join_worker(handle_a), join_worker(handle_b))
    });

    let (visits_a, classifier_a, queue_a) = worker_a.into_parts();
    let (visits_b, classifier_b, queue_b) = worker_b.into_parts();
    drop(visits_a);
    drop(visits_b);

    let mut leftovers: VecDeque<RegionId> = VecDeque::new();
    if outcome_a == ScanOutcome::Cancelled {
        leftovers.extend(queue_a);
    }
    if outcome_b == ScanOutcome::Cancelled {
        leftovers.extend(queue_b);
    }

    let mut tree = Arc::into_inner(shared)
        .expect("scan workers have exited")
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    if !leftovers.is_empty() {
        debug!("draining {} regions left by the cancelled worker", leftovers.len());
        // The classifiers are interchangeable by contract; hand the drain to
        // one from a worker that survived.
        let classifier = if outcome_a == ScanOutcome::Cancelled {
            classifier_b
        } else {
            classifier_a
        };
        let mut finisher = Scanner::new(&mut tree, classifier);
        for region in leftovers {
            finisher.push_seed(region);
        }
        let outcome = finisher.run();
        debug_assert!(outcome == ScanOutcome::Completed, "drain cannot be cancelled");
    }
    tree
}

fn join_worker(handle: thread::ScopedJoinHandle<'_, ScanOutcome>) -> ScanOutcome {
    match handle.join() {
        Ok(outcome) => outcome,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}
