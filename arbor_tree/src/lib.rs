// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_tree --heading-base-level=0

//! Arbor Tree: an immutable folder/file hierarchy with structural edits.
//!
//! Arbor Tree is the data half of an interactive tree diagram: it owns the
//! canonical hierarchy and turns user gestures into new snapshots of it.
//!
//! - Represents an ordered, rooted hierarchy of [`TreeNode`]s, each a folder or a file.
//! - Applies renames, drag-and-drop reparenting, batch deletes, and expand/collapse
//!   hints as copy-on-write edits that return a new [`Tree`].
//! - Refuses edits that would corrupt the hierarchy, most importantly moving a
//!   folder into its own subtree.
//!
//! ## Where this fits
//!
//! - Tree (this crate): identity, structure, and edits.
//! - Layout (`arbor_layout`): positions and connectors for the visible part of a tree.
//! - Interaction (`arbor_interaction`): drag and rename sessions driving the two.
//!
//! This crate does not parse input documents or persist anything. Hosts build the
//! initial [`TreeNode`] themselves and store whatever snapshot an edit returns.
//!
//! ## Edits never fail
//!
//! User interfaces routinely deliver events that refer to nodes that have
//! already been deleted or renamed. Every edit therefore accepts stale ids and
//! simply returns an unchanged snapshot. The one rule a caller must respect is
//! [`Tree::validate_move`] before [`Tree::reparent`]; `reparent` re-checks it and
//! does nothing when it does not hold.
//!
//! ```rust
//! use arbor_tree::{ExpandState, NodeId, Tree, TreeNode};
//!
//! let tree = Tree::new(TreeNode::folder(
//!     NodeId(0),
//!     "src",
//!     [
//!         TreeNode::folder(NodeId(1), "components", [TreeNode::file(NodeId(2), "Header.tsx")]),
//!         TreeNode::folder(NodeId(3), "pages", []),
//!     ],
//! ));
//!
//! // A folder cannot be dropped inside itself.
//! assert!(!tree.validate_move(NodeId(1), NodeId(1)));
//!
//! let tree = tree
//!     .rename(NodeId(3), " routes ")
//!     .set_expanded([NodeId(1)], ExpandState::Collapsed)
//!     .delete([NodeId(2)]);
//!
//! assert_eq!(tree.get(NodeId(3)).unwrap().name(), "routes");
//! assert_eq!(tree.get(NodeId(1)).unwrap().expanded_hint(), Some(false));
//! assert!(!tree.contains(NodeId(2)));
//!
//! // Deleting the root is refused.
//! let same = tree.delete([NodeId(0)]);
//! assert!(same.ptr_eq(&tree));
//! ```
//!
//! ## Depth
//!
//! Lookups and edits walk the tree with explicit stacks, so deep hierarchies
//! are limited by memory rather than by the call stack.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`TreeNode`], [`NodeId`], and [`NodeKind`].
//!   Deserializing a file that lists children fails with `TreeNodeError`.
//! - `tracing`: emits `tracing` events when an edit is rejected or ignored.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod edit;
mod traverse;
mod tree;
mod types;

pub use edit::{Edit, MoveError};
pub use traverse::{Iter, SubtreeStats};
pub use tree::Tree;
pub use types::{ExpandState, NodeId, NodeKind, TreeNode};
#[cfg(feature = "serde")]
pub use types::TreeNodeError;
