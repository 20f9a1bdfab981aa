// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass: subtree widths, placement, and connector derivation.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use arbor_tree::{NodeId, TreeNode};
use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::config::LayoutConfig;
use crate::expansion::ExpansionSet;
use crate::types::{Connector, NodePosition};

/// Computes positions and connectors for the visible part of a tree.
///
/// A node is visible when every ancestor on its path from the root is an
/// expanded folder. Each visible level is one row; each expanded folder's
/// children form a row centered under it, packed left to right in sibling
/// order, with every child centered in a slot as wide as its own visible
/// subtree.
///
/// The engine is a pure function of `(tree, expanded, config)`.
///
/// ## Example
///
/// ```rust
/// use arbor_layout::{ExpansionSet, LayoutEngine};
/// use arbor_tree::{NodeId, Tree, TreeNode};
///
/// let tree = Tree::new(TreeNode::folder(
///     NodeId(0),
///     "src",
///     [TreeNode::file(NodeId(1), "a.rs"), TreeNode::file(NodeId(2), "b.rs")],
/// ));
/// let expanded = ExpansionSet::from_tree(tree.root());
///
/// let layout = LayoutEngine::default().compute(tree.root_arc(), &expanded);
/// assert_eq!(layout.len(), 3);
/// assert_eq!(layout.connectors().len(), 2);
///
/// // Children sit one level step below the root, mirrored around its center.
/// let root = layout.position(NodeId(0)).unwrap();
/// let a = layout.position(NodeId(1)).unwrap();
/// let b = layout.position(NodeId(2)).unwrap();
/// assert_eq!(a.origin().y, 80.0);
/// assert_eq!(root.center().x - a.center().x, b.center().x - root.center().x);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutEngine {
    /// Box size and spacing.
    pub config: LayoutConfig,
}

/// The result of one layout pass.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    positions: Vec<NodePosition>,
    connectors: Vec<Connector>,
    index: HashMap<NodeId, usize>,
}

impl Layout {
    fn new(positions: Vec<NodePosition>, expanded: &ExpansionSet) -> Self {
        let index = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id(), i))
            .collect();
        let connectors = derive_connectors(&positions, &index, expanded);
        Self {
            positions,
            connectors,
            index,
        }
    }

    /// Placed nodes, root first. Look nodes up by id rather than by index.
    pub fn positions(&self) -> &[NodePosition] {
        &self.positions
    }

    /// Parent → child edges between visible nodes.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// The placement of `id`, if it is visible.
    pub fn position(&self, id: NodeId) -> Option<&NodePosition> {
        self.index.get(&id).map(|&i| &self.positions[i])
    }

    /// Whether `id` received a position.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of visible nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Union of all node boxes, for sizing a canvas.
    pub fn bounds(&self) -> Option<Rect> {
        let mut rects = self.positions.iter().map(|p| p.rect);
        let first = rects.next()?;
        Some(rects.fold(first, |acc, r| acc.union(r)))
    }
}

impl LayoutEngine {
    /// Create an engine with the given geometry.
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out `root` with the folders in `expanded` shown open.
    pub fn compute(&self, root: &Arc<TreeNode>, expanded: &ExpansionSet) -> Layout {
        let layout = Layout::new(self.positions(root, expanded), expanded);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            nodes = layout.len(),
            connectors = layout.connectors.len(),
            "layout pass"
        );
        layout
    }

    /// Only the placement half of [`LayoutEngine::compute`]: the root first,
    /// then its visible descendants in pre-order.
    pub fn positions(&self, root: &Arc<TreeNode>, expanded: &ExpansionSet) -> Vec<NodePosition> {
        let widths = self.subtree_widths(root, expanded);
        let cfg = &self.config;
        let half = cfg.node_width / 2.0;

        let mut out = Vec::new();
        let mut stack = vec![(root, cfg.origin_x + half, 0_usize)];
        while let Some((node, center_x, depth)) = stack.pop() {
            #[allow(
                clippy::cast_precision_loss,
                reason = "tree depth stays far below 2^52"
            )]
            let y = depth as f64 * cfg.level_step();
            out.push(NodePosition {
                node: Arc::clone(node),
                depth,
                rect: Rect::from_origin_size((center_x - half, y), cfg.node_size()),
            });
            if !is_open(node, expanded) {
                continue;
            }
            let slots: Vec<f64> = node.children().iter().map(|c| widths[&c.id()]).collect();
            let row = row_width(&slots, cfg.sibling_gap);
            let mut left = center_x - row / 2.0;
            let mut placed = Vec::with_capacity(slots.len());
            for (child, slot) in node.children().iter().zip(&slots) {
                placed.push((child, left + slot / 2.0, depth + 1));
                left += slot + cfg.sibling_gap;
            }
            // Reversed so the leftmost child is popped, and emitted, first.
            stack.extend(placed.into_iter().rev());
        }
        out
    }

    /// Horizontal space `node`'s visible subtree needs; never less than a node box.
    pub fn subtree_width(&self, node: &TreeNode, expanded: &ExpansionSet) -> f64 {
        self.subtree_widths(node, expanded)
            .get(&node.id())
            .copied()
            .unwrap_or(self.config.node_width)
    }

    /// Subtree widths of every visible node under `root`, computed post-order.
    fn subtree_widths(&self, root: &TreeNode, expanded: &ExpansionSet) -> HashMap<NodeId, f64> {
        let cfg = &self.config;
        let mut widths = HashMap::new();
        let mut stack = vec![(root, false)];
        while let Some((node, children_done)) = stack.pop() {
            if !is_open(node, expanded) {
                widths.insert(node.id(), cfg.node_width);
            } else if children_done {
                let slots: Vec<f64> = node.children().iter().map(|c| widths[&c.id()]).collect();
                let width = row_width(&slots, cfg.sibling_gap).max(cfg.node_width);
                widths.insert(node.id(), width);
            } else {
                stack.push((node, true));
                stack.extend(node.children().iter().map(|c| (&**c, false)));
            }
        }
        widths
    }

    /// Derive connectors from an existing placement.
    ///
    /// One connector per `(parent, child)` pair where the parent is expanded
    /// and both ends were placed.
    pub fn connectors(
        &self,
        positions: &[NodePosition],
        expanded: &ExpansionSet,
    ) -> Vec<Connector> {
        let index = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id(), i))
            .collect();
        derive_connectors(positions, &index, expanded)
    }
}

fn is_open(node: &TreeNode, expanded: &ExpansionSet) -> bool {
    node.is_folder() && !node.children().is_empty() && expanded.contains(node.id())
}

/// Sum of slot widths plus one gap between each adjacent pair.
fn row_width(slots: &[f64], gap: f64) -> f64 {
    let gaps = slots.len().saturating_sub(1);
    #[allow(
        clippy::cast_precision_loss,
        reason = "sibling counts stay far below 2^52"
    )]
    let gaps = gaps as f64;
    slots.iter().sum::<f64>() + gap * gaps
}

fn derive_connectors(
    positions: &[NodePosition],
    index: &HashMap<NodeId, usize>,
    expanded: &ExpansionSet,
) -> Vec<Connector> {
    let mut out = Vec::new();
    for parent in positions {
        if !parent.node.is_folder() || !expanded.contains(parent.id()) {
            continue;
        }
        let from = Point::new(parent.rect.center().x, parent.rect.y1);
        for child in parent.node.children() {
            let Some(&i) = index.get(&child.id()) else {
                continue;
            };
            let placed = &positions[i];
            out.push(Connector {
                parent: parent.id(),
                child: placed.id(),
                from,
                to: Point::new(placed.rect.center().x, placed.rect.y0),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_tree::Tree;

    const ROOT: NodeId = NodeId(0);
    const A: NodeId = NodeId(1);
    const B: NodeId = NodeId(2);
    const C: NodeId = NodeId(3);

    /// `src → [components → [Header.tsx], pages]`
    fn scenario() -> Tree {
        Tree::new(TreeNode::folder(
            ROOT,
            "src",
            [
                TreeNode::folder(A, "components", [TreeNode::file(B, "Header.tsx")])
                    .with_expanded_hint(Some(true)),
                TreeNode::folder(C, "pages", []),
            ],
        ))
    }

    fn pairs(layout: &Layout) -> Vec<(NodeId, NodeId)> {
        let mut pairs: Vec<_> = layout
            .connectors()
            .iter()
            .map(|c| (c.parent, c.child))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn scenario_positions_and_connectors() {
        let tree = scenario();
        let expanded: ExpansionSet = [ROOT, A].into_iter().collect();
        let layout = LayoutEngine::default().compute(tree.root_arc(), &expanded);

        assert_eq!(layout.len(), 4);
        assert_eq!(layout.positions()[0].id(), ROOT, "root first");
        assert_eq!(pairs(&layout), vec![(ROOT, A), (ROOT, C), (A, B)]);

        // Row under the root: 120 + 40 + 120 = 280 wide, centered at x = 60.
        let origin = |id| layout.position(id).unwrap().origin();
        assert_eq!(origin(ROOT), Point::new(0.0, 0.0));
        assert_eq!(origin(A), Point::new(-80.0, 80.0));
        assert_eq!(origin(C), Point::new(80.0, 80.0));
        assert_eq!(origin(B), Point::new(-80.0, 160.0));
    }

    #[test]
    fn connectors_attach_bottom_center_to_top_center() {
        let tree = scenario();
        let expanded: ExpansionSet = [ROOT, A].into_iter().collect();
        let layout = LayoutEngine::default().compute(tree.root_arc(), &expanded);
        let edge = layout
            .connectors()
            .iter()
            .find(|c| c.parent == ROOT && c.child == C)
            .unwrap();
        assert_eq!(edge.from, Point::new(60.0, 40.0));
        assert_eq!(edge.to, Point::new(140.0, 80.0));
    }

    #[test]
    fn collapsed_root_shows_only_the_root() {
        let tree = scenario();
        let expanded: ExpansionSet = [A].into_iter().collect();
        let layout = LayoutEngine::default().compute(tree.root_arc(), &expanded);
        assert_eq!(layout.len(), 1);
        assert!(layout.connectors().is_empty());
        assert!(
            !layout.is_visible(B),
            "expanded only counts along an open chain"
        );
    }

    #[test]
    fn expanded_empty_folder_and_files_are_one_box_wide() {
        let tree = scenario();
        let expanded: ExpansionSet = [ROOT, A, C].into_iter().collect();
        let engine = LayoutEngine::default();
        let root = tree.root();
        let width = |id| engine.subtree_width(root.find(id).unwrap(), &expanded);
        assert_eq!(width(C), 120.0);
        assert_eq!(width(B), 120.0);
        assert_eq!(engine.subtree_width(root, &expanded), 280.0);
        let layout = engine.compute(tree.root_arc(), &expanded);
        assert!(layout.connectors().iter().all(|c| c.parent != C));
    }

    #[test]
    fn wide_subtrees_push_siblings_apart() {
        // root → [x → [1, 2, 3], y]
        let tree = Tree::new(TreeNode::folder(
            ROOT,
            "root",
            [
                TreeNode::folder(
                    A,
                    "x",
                    [
                        TreeNode::file(NodeId(10), "1"),
                        TreeNode::file(NodeId(11), "2"),
                        TreeNode::file(NodeId(12), "3"),
                    ],
                ),
                TreeNode::file(C, "y"),
            ],
        ));
        let expanded: ExpansionSet = [ROOT, A].into_iter().collect();
        let engine = LayoutEngine::default();
        let x = tree.get(A).unwrap();
        assert_eq!(engine.subtree_width(x, &expanded), 440.0);
        let layout = engine.compute(tree.root_arc(), &expanded);

        // Row: 440 + 40 + 120 = 600, starting at 60 - 300 = -240.
        let center = |id| layout.position(id).unwrap().center().x;
        assert_eq!(center(A), -20.0);
        assert_eq!(center(C), 300.0);
        assert_eq!(center(NodeId(10)), -180.0);
        assert_eq!(center(NodeId(11)), -20.0);
        assert_eq!(center(NodeId(12)), 140.0);

        // No two boxes on a level overlap.
        for p in layout.positions() {
            for q in layout.positions() {
                if p.id() != q.id() && p.depth == q.depth {
                    let overlap = p.rect.intersect(q.rect).area();
                    assert!(overlap <= 0.0, "{p:?} overlaps {q:?}");
                }
            }
        }
    }

    #[test]
    fn configured_geometry_and_origin() {
        let tree = scenario();
        let expanded = ExpansionSet::from_tree(tree.root());
        let engine = LayoutEngine::new(LayoutConfig {
            node_width: 10.0,
            node_height: 5.0,
            level_gap: 5.0,
            sibling_gap: 2.0,
            origin_x: 100.0,
        });
        let layout = engine.compute(tree.root_arc(), &expanded);
        let placed = |id| layout.position(id).unwrap();
        assert_eq!(placed(ROOT).rect, Rect::new(100.0, 0.0, 110.0, 5.0));
        // Row 10 + 2 + 10 = 22 centered at 105.
        assert_eq!(placed(A).origin(), Point::new(94.0, 10.0));
        assert_eq!(placed(C).origin(), Point::new(106.0, 10.0));
        assert_eq!(placed(B).origin().y, 20.0);
        assert_eq!(layout.bounds(), Some(Rect::new(94.0, 0.0, 116.0, 25.0)));
    }

    #[test]
    fn separate_connector_derivation_matches_compute() {
        let tree = scenario();
        let expanded = ExpansionSet::from_tree(tree.root());
        let engine = LayoutEngine::default();
        let layout = engine.compute(tree.root_arc(), &expanded);
        let positions = engine.positions(tree.root_arc(), &expanded);
        let derived = engine.connectors(&positions, &expanded);
        assert_eq!(derived, layout.connectors());
    }
}
