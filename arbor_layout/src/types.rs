// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout output: placed nodes and connectors.

use alloc::sync::Arc;

use arbor_tree::{NodeId, TreeNode};
use kurbo::{Point, Rect};

/// A visible node together with its box in layout space.
///
/// Recomputed from scratch on every layout pass; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePosition {
    /// The node, shared with the tree snapshot it was laid out from.
    pub node: Arc<TreeNode>,
    /// Level below the root (the root is `0`).
    pub depth: usize,
    /// The node's box. Its top-left corner is the anchor.
    pub rect: Rect,
}

impl NodePosition {
    /// Id of the placed node.
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Top-left corner of the box.
    pub fn origin(&self) -> Point {
        self.rect.origin()
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// A parent → child edge between two visible nodes.
///
/// The endpoints are attachment points only (bottom-center of the parent,
/// top-center of the child); the curve drawn between them is up to the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connector {
    /// The expanded parent.
    pub parent: NodeId,
    /// The visible child.
    pub child: NodeId,
    /// Bottom-center of the parent box.
    pub from: Point,
    /// Top-center of the child box.
    pub to: Point,
}
