// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit values and the reasons a move is rejected.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::types::{ExpandState, NodeId};

/// One user intent against a [`crate::Tree`], applied with [`crate::Tree::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    /// See [`crate::Tree::rename`].
    Rename {
        /// Node to rename.
        id: NodeId,
        /// New label; trimmed before use.
        name: String,
    },
    /// See [`crate::Tree::reparent`].
    Reparent {
        /// Node to move, with its whole subtree.
        dragged: NodeId,
        /// Folder that receives it as its last child.
        new_parent: NodeId,
    },
    /// See [`crate::Tree::delete`].
    Delete(Vec<NodeId>),
    /// See [`crate::Tree::set_expanded`].
    SetExpanded {
        /// Folders whose hint changes.
        ids: Vec<NodeId>,
        /// Hint to record.
        state: ExpandState,
    },
}

/// Why a node cannot be moved onto a target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// The node was dropped onto itself.
    SameNode,
    /// The dragged node or the target is not in the tree.
    NotFound(NodeId),
    /// The target is a file.
    TargetNotFolder,
    /// The target lies inside the dragged subtree; moving would create a cycle.
    TargetInsideDragged,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameNode => f.write_str("a node cannot be moved onto itself"),
            Self::NotFound(id) => write!(f, "node {} is not in the tree", id.get()),
            Self::TargetNotFolder => f.write_str("only folders can receive children"),
            Self::TargetInsideDragged => f.write_str("target lies inside the dragged subtree"),
        }
    }
}

impl core::error::Error for MoveError {}
