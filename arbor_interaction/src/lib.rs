// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_interaction --heading-base-level=0

//! Arbor Interaction: gesture state and a view controller for tree diagrams.
//!
//! Hosts translate their toolkit's pointer and keyboard events into the calls
//! below. Nothing here draws or hit-tests; the host decides which node is
//! under the pointer, and this crate decides what that means for the tree.
//!
//! - [`session::InteractionState`]: one gesture at a time, idle, dragging a
//!   node, or renaming one. Drops and committed renames produce new
//!   [`arbor_tree::Tree`] snapshots.
//! - [`TreeView`]: owns the current snapshot, the open folders, the gesture
//!   state, and the cached [`arbor_layout::Layout`], and re-runs the layout
//!   after every change.
//!
//! ## Example
//!
//! ```rust
//! use arbor_interaction::TreeView;
//! use arbor_layout::LayoutConfig;
//! use arbor_tree::{NodeId, Tree, TreeNode};
//!
//! let tree = Tree::new(TreeNode::folder(
//!     NodeId(0),
//!     "docs",
//!     [TreeNode::file(NodeId(1), "intro.md"), TreeNode::folder(NodeId(2), "api", [])],
//! ));
//! let mut view = TreeView::new(tree, LayoutConfig::default());
//!
//! // Double-click on `intro.md`, type, press Enter.
//! view.begin_rename(NodeId(1));
//! view.update_rename("overview.md");
//! let saved = view.commit_rename().expect("renamed");
//! assert_eq!(saved.get(NodeId(1)).map(|n| n.name()), Some("overview.md"));
//!
//! // The layout already reflects the new snapshot.
//! let placed = view.layout().position(NodeId(1)).expect("visible");
//! assert_eq!(placed.node.name(), "overview.md");
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `arbor_layout/std`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for rejected drops.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod session;
mod view;

pub use session::{DropOutcome, Interaction, InteractionState};
pub use view::TreeView;
