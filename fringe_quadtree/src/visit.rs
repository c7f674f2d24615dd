// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The growable visitation tree recorded while a boundary scan runs.

use alloc::vec::Vec;

use crate::node::{NodeKind, VisitNode};
use crate::types::{QuadBounds, Quadrant, RegionId, RegionType};

/// Where a node lives: the root slot or an arena index.
///
/// The root is not part of the arena so that growth can move it into a child
/// slot without shifting anything else.
#[derive(Copy, Clone)]
enum Slot {
    Root,
    Arena(usize),
}

/// A growable quadtree recording which regions a scan has touched and how
/// each was classified.
///
/// The tree is anchored at the origin: its bounds always start at `(0, 0)`
/// and cover a `2^(height-1)` square. Visiting a region outside the current
/// coverage grows the tree by wrapping the root as the SW quadrant of a new,
/// taller root until the region fits; out-of-bounds writes are never an
/// error. The arena is append-only, so growth never invalidates indices.
///
/// Untouched space is implicitly [`RegionType::Unknown`]. The bottom level
/// (height 2) stores its four cells inline in a single leaf-quad node.
#[derive(Clone)]
pub struct VisitTree {
    nodes: Vec<VisitNode>,
    root: VisitNode,
    bounds: QuadBounds,
}

impl VisitTree {
    /// Create an empty tree covering a `2^(height-1)` square at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `height` is outside `2..=32`.
    pub fn new(height: u8) -> Self {
        assert!(
            (2..=32).contains(&height),
            "visit tree height must be in 2..=32"
        );
        Self {
            nodes: Vec::new(),
            root: VisitNode::UNKNOWN,
            bounds: QuadBounds::new(0, 0, height),
        }
    }

    /// Current coverage of the root.
    pub fn bounds(&self) -> QuadBounds {
        self.bounds
    }

    /// Current height of the root.
    pub fn height(&self) -> u8 {
        self.bounds.height
    }

    /// The root node. Exposed, with [`nodes`](Self::nodes), for external
    /// persistence of a finished scan.
    pub fn root_node(&self) -> VisitNode {
        self.root
    }

    /// The flat backing array of non-root nodes.
    pub fn nodes(&self) -> &[VisitNode] {
        &self.nodes
    }

    /// Total number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() + 1
    }

    /// Record a classification for a region, growing coverage as needed.
    ///
    /// Idempotent insert-or-overwrite: re-visiting a region with the same
    /// classification leaves the tree byte-identical, and a different
    /// classification overwrites the old one in place.
    pub fn visit(&mut self, region: RegionId, class: RegionType) {
        while !self.bounds.contains(region) {
            self.grow();
        }
        let mut bounds = self.bounds;
        let mut slot = Slot::Root;
        loop {
            let node = self.get(slot);
            if bounds.height == 2 {
                let quadrant = bounds.quadrant_of(region);
                let updated = match node.kind() {
                    NodeKind::Leaf => VisitNode::leaf_quad_uniform(node.region_type())
                        .with_quadrant(quadrant, class),
                    NodeKind::LeafQuad => node.with_quadrant(quadrant, class),
                    NodeKind::Branch => unreachable!("branch at the leaf-quad level"),
                };
                self.set(slot, updated);
                return;
            }
            let base = match node.kind() {
                NodeKind::Branch => node.child_base(),
                NodeKind::Leaf => {
                    let base = self.alloc_children(node.region_type());
                    self.set(slot, VisitNode::branch(base));
                    base as usize
                }
                NodeKind::LeafQuad => unreachable!("leaf quad above the leaf-quad level"),
            };
            let quadrant = bounds.quadrant_of(region);
            slot = Slot::Arena(base + quadrant.index());
            bounds = bounds.child(quadrant);
        }
    }

    /// Whether a region has been classified as anything but Unknown.
    ///
    /// Pure lookup: regions outside current coverage, or under an
    /// unclassified leaf, report false.
    pub fn has_visited(&self, region: RegionId) -> bool {
        if !self.bounds.contains(region) {
            return false;
        }
        let mut bounds = self.bounds;
        let mut node = self.root;
        loop {
            match node.kind() {
                NodeKind::Leaf => return node.region_type() != RegionType::Unknown,
                NodeKind::LeafQuad => {
                    return node.quadrant_type(bounds.quadrant_of(region)) != RegionType::Unknown;
                }
                NodeKind::Branch => {
                    let quadrant = bounds.quadrant_of(region);
                    node = self.nodes[node.child_base() + quadrant.index()];
                    bounds = bounds.child(quadrant);
                }
            }
        }
    }

    /// Every region classified Border, in depth-first order.
    pub fn border_regions(&self) -> Vec<RegionId> {
        let mut out = Vec::new();
        let mut stack = alloc::vec![(self.root, self.bounds)];
        while let Some((node, bounds)) = stack.pop() {
            match node.kind() {
                NodeKind::Leaf => {
                    if node.region_type() == RegionType::Border {
                        // A uniform border square; enumerate its cells.
                        let side = bounds.side_length();
                        for dy in 0..side {
                            for dx in 0..side {
                                #[allow(
                                    clippy::cast_possible_truncation,
                                    reason = "offsets within an in-range square fit u32"
                                )]
                                out.push(RegionId::new(bounds.x + dx as u32, bounds.y + dy as u32));
                            }
                        }
                    }
                }
                NodeKind::LeafQuad => {
                    for quadrant in Quadrant::ALL {
                        if node.quadrant_type(quadrant) == RegionType::Border {
                            out.push(bounds.child(quadrant).origin_region());
                        }
                    }
                }
                NodeKind::Branch => {
                    let base = node.child_base();
                    for quadrant in Quadrant::ALL {
                        stack.push((self.nodes[base + quadrant.index()], bounds.child(quadrant)));
                    }
                }
            }
        }
        out
    }

    /// Double coverage by wrapping the root as the SW quadrant of a new root.
    ///
    /// Adds exactly four arena slots: the old root and three Unknown leaves.
    fn grow(&mut self) {
        let base = self.alloc_base();
        self.nodes.push(self.root);
        self.nodes.push(VisitNode::UNKNOWN);
        self.nodes.push(VisitNode::UNKNOWN);
        self.nodes.push(VisitNode::UNKNOWN);
        self.root = VisitNode::branch(base);
        self.bounds = self.bounds.expanded();
    }

    /// Allocate four fresh leaves of the given type; returns their base.
    fn alloc_children(&mut self, class: RegionType) -> u32 {
        let base = self.alloc_base();
        self.nodes.extend_from_slice(&[VisitNode::leaf(class); 4]);
        base
    }

    fn alloc_base(&self) -> u32 {
        let base = self.nodes.len();
        debug_assert!(base as u64 <= VisitNode::MAX_CHILD_BASE as u64, "arena full");
        #[allow(
            clippy::cast_possible_truncation,
            reason = "arena size is bounded by the 30-bit child base"
        )]
        let base = base as u32;
        base
    }

    fn get(&self, slot: Slot) -> VisitNode {
        match slot {
            Slot::Root => self.root,
            Slot::Arena(index) => self.nodes[index],
        }
    }

    fn set(&mut self, slot: Slot, node: VisitNode) {
        match slot {
            Slot::Root => self.root = node,
            Slot::Arena(index) => self.nodes[index] = node,
        }
    }
}

impl core::fmt::Debug for VisitTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisitTree")
            .field("height", &self.bounds.height)
            .field("node_count", &self.node_count())
            .finish_non_exhaustive()
    }
}
