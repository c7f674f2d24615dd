// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable canonical quadtree and the hash-consing builder that
//! constructs it.

use alloc::vec::Vec;
use core::marker::PhantomData;

use hashbrown::HashMap;

use crate::node::CanonNode;
use crate::types::NodeClass;

/// An immutable, deduplicated quadtree over the leaf alphabet `L`.
///
/// Built exactly once by an [`IndexBuilder`] and never mutated afterward;
/// queries take `&self` and may run concurrently. Structurally identical
/// subtrees are the *same* node: equal child 4-tuples alias to one branch,
/// and equal leaves are equal values outright, so comparing two nodes for
/// equality compares whole subtrees.
///
/// `QuadIndex<RegionClass>` (see [`RegionIndex`](crate::RegionIndex)) is the
/// compressed record of one boundary scan; `QuadIndex<DiffClass>` (see
/// [`DiffIndex`](crate::DiffIndex)) encodes the difference between two scans.
#[derive(Clone, PartialEq, Eq)]
pub struct QuadIndex<L: NodeClass> {
    nodes: Vec<CanonNode>,
    root: CanonNode,
    height: u8,
    _class: PhantomData<L>,
}

impl<L: NodeClass> QuadIndex<L> {
    /// The root node.
    pub fn root(&self) -> CanonNode {
        self.root
    }

    /// Height of the root; the covered square is `2^(height-1)` regions on
    /// a side.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of arena slots. Leaves live inline in their parents, so this
    /// counts four slots per distinct branch.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The flat backing array, for external persistence.
    pub fn nodes(&self) -> &[CanonNode] {
        &self.nodes
    }

    /// The four children of a branch, in SW, SE, NW, NE order.
    pub fn children(&self, branch: CanonNode) -> [CanonNode; 4] {
        let base = branch.child_base();
        [
            self.nodes[base],
            self.nodes[base + 1],
            self.nodes[base + 2],
            self.nodes[base + 3],
        ]
    }
}

impl<L: NodeClass> core::fmt::Debug for QuadIndex<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadIndex")
            .field("height", &self.height)
            .field("node_count", &self.node_count())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Construction state for a [`QuadIndex`]: the growing node array plus the
/// hash-consing cache keyed on child 4-tuples.
///
/// The cache is what gives the finished index its identity discipline; it is
/// discarded by [`finish`](Self::finish).
pub struct IndexBuilder<L: NodeClass> {
    nodes: Vec<CanonNode>,
    cache: HashMap<[CanonNode; 4], CanonNode>,
    _class: PhantomData<L>,
}

impl<L: NodeClass> IndexBuilder<L> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            cache: HashMap::new(),
            _class: PhantomData,
        }
    }

    /// Combine four children into one node.
    ///
    /// Four identical leaves collapse to that leaf. Any other combination
    /// yields a branch labelled by [`NodeClass::merge`]; a combination seen
    /// before returns the previously built branch, so equal subtrees alias.
    pub fn make_quad(&mut self, children: [CanonNode; 4]) -> CanonNode {
        if children[0].is_leaf() && children.iter().all(|child| *child == children[0]) {
            return children[0];
        }
        if let Some(&node) = self.cache.get(&children) {
            return node;
        }
        let base = self.nodes.len();
        debug_assert!(
            base as u64 <= CanonNode::MAX_CHILD_BASE as u64,
            "canonical arena full"
        );
        self.nodes.extend_from_slice(&children);
        let label = L::merge(children.map(|child| child.class::<L>()));
        #[allow(
            clippy::cast_possible_truncation,
            reason = "arena size is bounded by the 26-bit child base"
        )]
        let node = CanonNode::branch(label, base as u32);
        self.cache.insert(children, node);
        node
    }

    /// Freeze the built nodes into an immutable index, discarding the cache.
    pub fn finish(self, root: CanonNode, height: u8) -> QuadIndex<L> {
        QuadIndex {
            nodes: self.nodes,
            root,
            height,
            _class: PhantomData,
        }
    }
}

impl<L: NodeClass> Default for IndexBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: NodeClass> core::fmt::Debug for IndexBuilder<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("node_count", &self.nodes.len())
            .field("cached_quads", &self.cache.len())
            .finish_non_exhaustive()
    }
}
