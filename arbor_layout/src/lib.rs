// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_layout --heading-base-level=0

//! Arbor Layout: top-down node-link layout for folder/file trees.
//!
//! Given an `arbor_tree` hierarchy and the set of folders currently shown open,
//! this crate computes a box for every visible node and the parent → child
//! connectors between them. It knows nothing about edits, selection, or
//! painting: hosts re-run the layout after every new tree snapshot and hand
//! the result to their renderer.
//!
//! - [`LayoutEngine`]: pure layout pass configured by a [`LayoutConfig`].
//! - [`ExpansionSet`]: transient open/closed state keyed by node id.
//! - [`Layout`]: placed [`NodePosition`]s plus [`Connector`]s, indexed by id.
//!
//! ## Algorithm
//!
//! A node's subtree width is one box wide if it is a file, a closed folder,
//! or an empty folder. Otherwise it is the sum of its children's subtree
//! widths plus one sibling gap between each pair, and never less than one box.
//! The root sits at `(origin_x, 0)`; each level is one level step further
//! down; the children of an open folder form a row centered under it in which
//! every child is centered within its own subtree width.
//!
//! A folder being in the [`ExpansionSet`] only matters while all of its
//! ancestors are open too: closing a folder hides its whole subtree.
//!
//! ```rust
//! use arbor_layout::{ExpansionSet, LayoutEngine};
//! use arbor_tree::{NodeId, Tree, TreeNode};
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
//! let engine = LayoutEngine::default();
//! let mut expanded = ExpansionSet::from_tree(tree.root());
//! assert_eq!(engine.compute(tree.root_arc(), &expanded).len(), 4);
//!
//! expanded.collapse(NodeId(0));
//! let layout = engine.compute(tree.root_arc(), &expanded);
//! assert_eq!(layout.len(), 1);
//! assert!(layout.connectors().is_empty());
//! ```
//!
//! Both passes walk the tree with explicit stacks, so very deep trees do not
//! exhaust the call stack.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`LayoutConfig`].
//! - `tracing`: emits a `tracing` event per layout pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod expansion;
mod types;

pub use config::LayoutConfig;
pub use engine::{Layout, LayoutEngine};
pub use expansion::ExpansionSet;
pub use types::{Connector, NodePosition};
