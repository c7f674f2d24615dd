// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot canonicalization of a finished visitation tree.

use crate::index::IndexBuilder;
use crate::node::{CanonNode, NodeKind, VisitNode};
use crate::types::{Quadrant, RegionClass};
use crate::visit::VisitTree;
use crate::RegionIndex;

/// Compress a finished visitation tree into a canonical index.
///
/// Scan-time classifications fold to the canonical alphabet (Unknown and
/// Rejected both become Empty), uniform squares collapse to single leaves,
/// and structurally identical subtrees are deduplicated by hash-consing.
/// The transform is deterministic: the same visitation tree always yields a
/// byte-identical index.
///
/// The scanned half-plane is anchored at the origin and its content never
/// reaches the upper half of the final root square (growth doubles coverage
/// until the widest extent fits, and the boundary is at most half as tall as
/// it is wide). The transform therefore descends only into the root's SW and
/// SE quadrants and synthesizes the root over two known-empty upper
/// quadrants.
pub fn compress(visits: &VisitTree) -> RegionIndex {
    let mut builder = IndexBuilder::new();
    let root = visits.root_node();
    let canon_root = match root.kind() {
        NodeKind::Branch => {
            let base = root.child_base();
            let sw = transform(visits, &mut builder, visits.nodes()[base]);
            let se = transform(visits, &mut builder, visits.nodes()[base + 1]);
            let empty = CanonNode::leaf(RegionClass::Empty);
            builder.make_quad([sw, se, empty, empty])
        }
        // A root that never branched (nothing or almost nothing was
        // visited): transform it directly.
        _ => transform(visits, &mut builder, root),
    };
    builder.finish(canon_root, visits.height())
}

fn transform(
    visits: &VisitTree,
    builder: &mut IndexBuilder<RegionClass>,
    node: VisitNode,
) -> CanonNode {
    match node.kind() {
        NodeKind::Leaf => CanonNode::leaf(RegionClass::from(node.region_type())),
        NodeKind::LeafQuad => {
            let children =
                Quadrant::ALL.map(|q| CanonNode::leaf(RegionClass::from(node.quadrant_type(q))));
            builder.make_quad(children)
        }
        NodeKind::Branch => {
            let base = node.child_base();
            let mut children = [CanonNode::leaf(RegionClass::Empty); 4];
            for quadrant in Quadrant::ALL {
                children[quadrant.index()] =
                    transform(visits, builder, visits.nodes()[base + quadrant.index()]);
            }
            builder.make_quad(children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RegionId, RegionType};

    fn scenario_tree() -> VisitTree {
        let mut tree = VisitTree::new(3);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1)] {
            tree.visit(RegionId::new(x, y), RegionType::Border);
        }
        tree
    }

    #[test]
    fn compression_is_deterministic() {
        let tree = scenario_tree();
        let first = compress(&tree);
        let second = compress(&tree);
        assert_eq!(first.nodes(), second.nodes());
        assert_eq!(first.root(), second.root());
        assert_eq!(first.height(), second.height());
    }

    #[test]
    fn unknown_and_rejected_fold_to_empty() {
        let mut tree = VisitTree::new(3);
        tree.visit(RegionId::new(0, 0), RegionType::Rejected);
        tree.visit(RegionId::new(1, 1), RegionType::Rejected);
        let index = compress(&tree);
        assert_eq!(index.root(), CanonNode::leaf(RegionClass::Empty));
        assert_eq!(index.node_count(), 0);
    }

    #[test]
    fn uniform_borders_collapse_to_one_leaf() {
        let mut tree = VisitTree::new(2);
        for x in 0..2 {
            for y in 0..2 {
                tree.visit(RegionId::new(x, y), RegionType::Border);
            }
        }
        let index = compress(&tree);
        assert_eq!(index.root(), CanonNode::leaf(RegionClass::Border));
    }

    #[test]
    fn identical_leaf_quads_share_one_branch() {
        // Two far-apart 2×2 squares with the same SW-only border pattern.
        let mut tree = VisitTree::new(4);
        tree.visit(RegionId::new(0, 0), RegionType::Border);
        tree.visit(RegionId::new(4, 0), RegionType::Border);
        let index = compress(&tree);

        // Walk to the two pattern branches and compare their child bases.
        let root_children = index.children(index.root());
        let sw = index.children(root_children[Quadrant::SW.index()]);
        let se = index.children(root_children[Quadrant::SE.index()]);
        let pattern_a = sw[Quadrant::SW.index()];
        let pattern_b = se[Quadrant::SW.index()];
        assert!(!pattern_a.is_leaf());
        assert_eq!(pattern_a, pattern_b);
        assert_eq!(pattern_a.child_base(), pattern_b.child_base());
    }

    #[test]
    fn scenario_labels_and_shape() {
        let index = compress(&scenario_tree());
        let root = index.root();
        assert!(!root.is_leaf());
        assert_eq!(root.class::<RegionClass>(), RegionClass::Border);
        let children = index.children(root);
        assert!(!children[Quadrant::SW.index()].is_leaf());
        assert!(!children[Quadrant::SE.index()].is_leaf());
        assert_eq!(
            children[Quadrant::NW.index()],
            CanonNode::leaf(RegionClass::Empty)
        );
        assert_eq!(
            children[Quadrant::NE.index()],
            CanonNode::leaf(RegionClass::Empty)
        );
    }
}
