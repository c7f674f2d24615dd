// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural diff of two canonical indices.

use crate::index::IndexBuilder;
use crate::node::CanonNode;
use crate::types::{DiffClass, RegionClass};
use crate::{DiffIndex, RegionIndex};

/// Which input the uniform (shallower) side of a mismatched pair came from.
#[derive(Copy, Clone)]
enum UniformSide {
    Before,
    After,
}

/// Compare two indices location by location, producing a diff index.
///
/// The walk is a lock-step recursion over both trees. Leaves meet leaves in
/// a fixed transition table; branches meet branches quadrant by quadrant;
/// and where a leaf meets a branch the leaf is treated as a uniform square,
/// with the deeper subtree copied pointwise through the transition. Indices
/// of different heights are first equalized by padding the shallower one
/// under empty quadrants, so resolution mismatches are never an error.
///
/// The result is hash-consed like any canonical tree, and `Empty` means "no
/// change", so `diff(a, a)` collapses to a single empty leaf and unchanged
/// areas vanish from range queries.
pub fn diff(before: &RegionIndex, after: &RegionIndex) -> DiffIndex {
    let height = before.height().max(after.height());
    let padded_before;
    let padded_after;
    let before = if before.height() < height {
        padded_before = padded(before, height);
        &padded_before
    } else {
        before
    };
    let after = if after.height() < height {
        padded_after = padded(after, height);
        &padded_after
    } else {
        after
    };

    let mut builder = IndexBuilder::new();
    let root = diff_nodes(before, after, before.root(), after.root(), &mut builder);
    builder.finish(root, height)
}

fn diff_nodes(
    before: &RegionIndex,
    after: &RegionIndex,
    a: CanonNode,
    b: CanonNode,
    builder: &mut IndexBuilder<DiffClass>,
) -> CanonNode {
    match (a.is_leaf(), b.is_leaf()) {
        (true, true) => CanonNode::leaf(DiffClass::between(a.class(), b.class())),
        (false, false) => {
            let children_a = before.children(a);
            let children_b = after.children(b);
            let mut children = [CanonNode::leaf(DiffClass::Empty); 4];
            for i in 0..4 {
                children[i] = diff_nodes(before, after, children_a[i], children_b[i], builder);
            }
            builder.make_quad(children)
        }
        (true, false) => copy_against(after, b, a.class(), UniformSide::Before, builder),
        (false, true) => copy_against(before, a, b.class(), UniformSide::After, builder),
    }
}

/// Copy the deeper subtree, applying the transition against a uniform class.
fn copy_against(
    deep: &RegionIndex,
    node: CanonNode,
    uniform: RegionClass,
    uniform_side: UniformSide,
    builder: &mut IndexBuilder<DiffClass>,
) -> CanonNode {
    if node.is_leaf() {
        let class = node.class::<RegionClass>();
        let transition = match uniform_side {
            UniformSide::Before => DiffClass::between(uniform, class),
            UniformSide::After => DiffClass::between(class, uniform),
        };
        return CanonNode::leaf(transition);
    }
    let source = deep.children(node);
    let mut children = [CanonNode::leaf(DiffClass::Empty); 4];
    for i in 0..4 {
        children[i] = copy_against(deep, source[i], uniform, uniform_side, builder);
    }
    builder.make_quad(children)
}

/// Rebuild `index` at a greater height, wrapping its root as the SW quadrant
/// under empty siblings. Mirrors visitation-tree growth.
fn padded(index: &RegionIndex, height: u8) -> RegionIndex {
    let mut builder = IndexBuilder::new();
    let mut root = copy_subtree(index, index.root(), &mut builder);
    let empty = CanonNode::leaf(RegionClass::Empty);
    for _ in index.height()..height {
        root = builder.make_quad([root, empty, empty, empty]);
    }
    builder.finish(root, height)
}

fn copy_subtree(
    index: &RegionIndex,
    node: CanonNode,
    builder: &mut IndexBuilder<RegionClass>,
) -> CanonNode {
    if node.is_leaf() {
        return node;
    }
    let source = index.children(node);
    let mut children = [CanonNode::leaf(RegionClass::Empty); 4];
    for i in 0..4 {
        children[i] = copy_subtree(index, source[i], builder);
    }
    builder.make_quad(children)
}
