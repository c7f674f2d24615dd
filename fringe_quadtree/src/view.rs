// Copyright 2026 the Fringe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space range queries against a canonical index.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::index::QuadIndex;
use crate::node::CanonNode;
use crate::types::{NodeClass, Quadrant};

impl<L: NodeClass> QuadIndex<L> {
    /// Collect the visible areas of the index inside the given dirty
    /// rectangles.
    ///
    /// `viewport` is the screen rectangle covered by the root square of the
    /// scanned (upper) half-plane, in a y-down pixel space; callers position
    /// and size it to place the index on screen. The scan only ever records
    /// the upper half, so a second, vertically mirrored pass walks the same
    /// tree over the equal-sized rectangle directly below the viewport and
    /// reconstructs the symmetric half without storing it.
    ///
    /// For each dirty rectangle the traversal descends from the root,
    /// skipping [`EMPTY`](NodeClass::EMPTY) subtrees and empty
    /// intersections, and emits `(intersection, class)` pairs for leaves and
    /// for squares that have shrunk to a single pixel (using the branch's
    /// merged label). Traversal is iterative to keep stack depth flat.
    pub fn visible_areas(&self, viewport: Rect, dirty: &[Rect]) -> Vec<(Rect, L)> {
        let mirror = Rect::new(
            viewport.x0,
            viewport.y1,
            viewport.x1,
            viewport.y1 + viewport.height(),
        );
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        for &dirty_rect in dirty {
            self.collect(viewport, dirty_rect, false, &mut queue, &mut out);
            self.collect(mirror, dirty_rect, true, &mut queue, &mut out);
        }
        out
    }

    fn collect(
        &self,
        root_rect: Rect,
        dirty: Rect,
        mirrored: bool,
        queue: &mut VecDeque<(CanonNode, Rect)>,
        out: &mut Vec<(Rect, L)>,
    ) {
        queue.clear();
        queue.push_back((self.root(), root_rect));
        while let Some((node, rect)) = queue.pop_front() {
            if node.class::<L>() == L::EMPTY {
                continue;
            }
            let overlap = rect.intersect(dirty);
            if overlap.width() <= 0.0 || overlap.height() <= 0.0 {
                continue;
            }
            if node.is_leaf() || rect.width() <= 1.0 {
                out.push((overlap, node.class()));
                continue;
            }
            let children = self.children(node);
            for quadrant in Quadrant::ALL {
                queue.push_back((
                    children[quadrant.index()],
                    quadrant_rect(rect, quadrant, mirrored),
                ));
            }
        }
    }
}

/// The screen rectangle of one region-space quadrant of `rect`.
///
/// Screen y grows downward while region y grows upward, so the NW quadrant
/// is the top-left quarter; the mirrored pass swaps the vertical pairs.
fn quadrant_rect(rect: Rect, quadrant: Quadrant, mirrored: bool) -> Rect {
    let mid_x = (rect.x0 + rect.x1) / 2.0;
    let mid_y = (rect.y0 + rect.y1) / 2.0;
    let quadrant = if mirrored {
        quadrant.flipped_vertical()
    } else {
        quadrant
    };
    match quadrant {
        Quadrant::NW => Rect::new(rect.x0, rect.y0, mid_x, mid_y),
        Quadrant::NE => Rect::new(mid_x, rect.y0, rect.x1, mid_y),
        Quadrant::SW => Rect::new(rect.x0, mid_y, mid_x, rect.y1),
        Quadrant::SE => Rect::new(mid_x, mid_y, rect.x1, rect.y1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress;
    use crate::types::{RegionClass, RegionId, RegionType};
    use crate::visit::VisitTree;

    fn scenario_index() -> QuadIndex<RegionClass> {
        let mut tree = VisitTree::new(3);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1)] {
            tree.visit(RegionId::new(x, y), RegionType::Border);
        }
        compress(&tree)
    }

    fn border_areas(areas: &[(Rect, RegionClass)]) -> Vec<Rect> {
        areas
            .iter()
            .filter(|(_, class)| *class == RegionClass::Border)
            .map(|(rect, _)| *rect)
            .collect()
    }

    #[test]
    fn full_viewport_emits_each_border_cell() {
        let index = scenario_index();
        // One pixel per region: the root square is 4×4.
        let viewport = Rect::new(0.0, 0.0, 4.0, 4.0);
        let top_half = Rect::new(0.0, 0.0, 4.0, 4.0);
        let areas = index.visible_areas(viewport, &[top_half]);
        let borders = border_areas(&areas);
        assert_eq!(borders.len(), 4);

        // Region (0, 0) is the bottom-left cell of the top half.
        assert!(borders.contains(&Rect::new(0.0, 3.0, 1.0, 4.0)));
        assert!(borders.contains(&Rect::new(1.0, 3.0, 2.0, 4.0)));
        assert!(borders.contains(&Rect::new(2.0, 3.0, 3.0, 4.0)));
        assert!(borders.contains(&Rect::new(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn mirror_pass_reflects_the_bottom_half() {
        let index = scenario_index();
        let viewport = Rect::new(0.0, 0.0, 4.0, 4.0);
        let everything = Rect::new(0.0, 0.0, 4.0, 8.0);
        let areas = index.visible_areas(viewport, &[everything]);
        let borders = border_areas(&areas);
        assert_eq!(borders.len(), 8);
        for rect in &borders {
            let reflected = Rect::new(rect.x0, 8.0 - rect.y1, rect.x1, 8.0 - rect.y0);
            assert!(
                borders.contains(&reflected),
                "mirror image of every emission is present"
            );
        }
    }

    #[test]
    fn disjoint_dirty_rect_emits_nothing() {
        let index = scenario_index();
        let viewport = Rect::new(0.0, 0.0, 4.0, 4.0);
        let off_screen = Rect::new(100.0, 100.0, 120.0, 120.0);
        assert!(index.visible_areas(viewport, &[off_screen]).is_empty());
    }

    #[test]
    fn dirty_rect_clips_emissions() {
        let index = scenario_index();
        let viewport = Rect::new(0.0, 0.0, 4.0, 4.0);
        // Only the left half of the bottom row of the top half.
        let dirty = Rect::new(0.0, 3.0, 2.0, 4.0);
        let areas = index.visible_areas(viewport, &[dirty]);
        let borders = border_areas(&areas);
        assert_eq!(borders.len(), 2);
        for (rect, _) in &areas {
            assert!(rect.x1 <= 2.0 && rect.y0 >= 3.0, "clipped to the dirty rect");
        }
    }

    #[test]
    fn single_pixel_squares_emit_the_merged_label() {
        let index = scenario_index();
        // Half a pixel per region: leaf quads degenerate before leaves are
        // reached and the branch label is emitted instead.
        let viewport = Rect::new(0.0, 0.0, 2.0, 2.0);
        let top_half = Rect::new(0.0, 0.0, 2.0, 2.0);
        let areas = index.visible_areas(viewport, &[top_half]);
        assert!(!areas.is_empty());
        assert!(areas.iter().all(|(_, class)| *class == RegionClass::Border));
    }
}
