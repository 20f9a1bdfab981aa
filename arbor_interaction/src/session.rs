// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop and inline-rename state for a tree diagram.
//!
//! This module tracks the short-lived gesture state that sits between user
//! input and tree edits. It never edits a tree on its own initiative: a drop
//! or a committed rename hands back a new [`Tree`] snapshot, and everything
//! else only updates the gesture state.
//!
//! ## Usage
//!
//! Dragging a file onto a folder:
//! ```
//! use arbor_interaction::session::{DropOutcome, InteractionState};
//! use arbor_tree::{NodeId, Tree, TreeNode};
//!
//! let tree = Tree::new(TreeNode::folder(
//!     NodeId(0),
//!     "src",
//!     [
//!         TreeNode::file(NodeId(1), "main.rs"),
//!         TreeNode::folder(NodeId(2), "bin", []),
//!     ],
//! ));
//! let mut state = InteractionState::new();
//!
//! state.on_drag_start(NodeId(1));
//!
//! // Hovering a file is not a valid drop target…
//! assert!(!state.on_drag_over(&tree, NodeId(1)));
//! // …hovering a folder is.
//! assert!(state.on_drag_over(&tree, NodeId(2)));
//!
//! match state.on_drop(&tree, NodeId(2)) {
//!     DropOutcome::Moved(next) => assert_eq!(next.parent_of(NodeId(1)), Some(NodeId(2))),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(state.is_idle());
//! ```
//!
//! Renaming, then backing out with Escape:
//! ```
//! # use arbor_interaction::session::InteractionState;
//! # use arbor_tree::{NodeId, Tree, TreeNode};
//! let tree = Tree::new(TreeNode::folder(NodeId(0), "src", []));
//! let mut state = InteractionState::new();
//!
//! assert!(state.begin_edit(&tree, NodeId(0)));
//! state.update_edit("lib");
//! assert!(state.cancel_edit());
//!
//! // Nothing was committed.
//! let next = state.commit_edit(&tree);
//! assert!(next.ptr_eq(&tree));
//! ```
//!
//! ## Transition rules
//!
//! 1. **One gesture at a time**: the state is exactly one of idle, dragging, or
//!    editing. Starting a drag while editing discards the pending text;
//!    starting an edit while dragging abandons the drag.
//! 2. **Drag replacement**: starting a new drag while one is active replaces
//!    the dragged node.
//! 3. **Hover**: a hovered node becomes the drop candidate only if the move is
//!    valid; otherwise the candidate is cleared.
//! 4. **Drop and drag end**: both always end the drag, whether or not the
//!    drop produced a move. Neither touches a rename in progress.
//! 5. **Rename**: committing applies the trimmed pending text through
//!    [`Tree::rename`]; blank or unchanged text commits nothing.

use alloc::string::{String, ToString};

use arbor_tree::{MoveError, NodeId, Tree};

/// The single active gesture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A node is being dragged.
    Dragging {
        /// The node being dragged.
        dragged: NodeId,
        /// The currently hovered node, if dropping there would be a valid move.
        target: Option<NodeId>,
    },
    /// A node label is being edited in place.
    Editing {
        /// The node being renamed.
        node: NodeId,
        /// Text typed so far.
        pending: String,
    },
}

/// What a drop did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The dragged node was moved; contains the new snapshot.
    Moved(Tree),
    /// The move was not valid; the tree is unchanged.
    Rejected(MoveError),
    /// Nothing was being dragged.
    NotDragging,
}

/// Gesture state machine for one tree diagram.
///
/// There is exactly one logical writer (the user, serialized through the
/// host's event queue), so this type needs no locking.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    current: Interaction,
}

impl InteractionState {
    /// Create an idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current gesture.
    pub fn current(&self) -> &Interaction {
        &self.current
    }

    /// Whether no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        self.current == Interaction::Idle
    }

    /// The node being dragged, if any.
    pub fn dragged(&self) -> Option<NodeId> {
        match self.current {
            Interaction::Dragging { dragged, .. } => Some(dragged),
            _ => None,
        }
    }

    /// The current valid drop candidate, if any.
    pub fn drop_target(&self) -> Option<NodeId> {
        match self.current {
            Interaction::Dragging { target, .. } => target,
            _ => None,
        }
    }

    /// The node being renamed and the text typed so far, if any.
    pub fn editing(&self) -> Option<(NodeId, &str)> {
        match &self.current {
            Interaction::Editing { node, pending } => Some((*node, pending)),
            _ => None,
        }
    }

    /// Start dragging `node`, replacing any gesture in progress.
    pub fn on_drag_start(&mut self, node: NodeId) {
        #[cfg(feature = "tracing")]
        tracing::trace!(node = node.get(), "drag start");
        self.current = Interaction::Dragging {
            dragged: node,
            target: None,
        };
    }

    /// Record the node under the pointer during a drag.
    ///
    /// # Arguments
    /// * `tree` - Snapshot the drop would apply to
    /// * `hovered` - Node currently under the pointer
    ///
    /// # Returns
    /// `true` if dropping on `hovered` would be a valid move. Always `false`
    /// when no drag is in progress.
    pub fn on_drag_over(&mut self, tree: &Tree, hovered: NodeId) -> bool {
        let Interaction::Dragging { dragged, target } = &mut self.current else {
            return false;
        };
        let valid = tree.validate_move(*dragged, hovered);
        *target = valid.then_some(hovered);
        valid
    }

    /// The pointer left the hovered node; clear the drop candidate.
    pub fn on_drag_leave(&mut self) {
        if let Interaction::Dragging { target, .. } = &mut self.current {
            *target = None;
        }
    }

    /// Drop the dragged node onto `target`.
    ///
    /// The move is validated against `tree` again, since the snapshot may
    /// have changed since the last hover. A drag in progress ends whatever
    /// the outcome; a rename in progress is left alone.
    pub fn on_drop(&mut self, tree: &Tree, target: NodeId) -> DropOutcome {
        let Interaction::Dragging { dragged, .. } = self.current else {
            return DropOutcome::NotDragging;
        };
        self.current = Interaction::Idle;
        match tree.check_move(dragged, target) {
            Ok(()) => DropOutcome::Moved(tree.reparent(dragged, target)),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    dragged = dragged.get(),
                    target = target.get(),
                    %err,
                    "drop rejected"
                );
                DropOutcome::Rejected(err)
            }
        }
    }

    /// The drag finished without a drop (or after one); return to idle.
    ///
    /// # Returns
    /// `true` if a drag was in progress.
    pub fn on_drag_end(&mut self) -> bool {
        if self.dragged().is_some() {
            self.current = Interaction::Idle;
            true
        } else {
            false
        }
    }

    /// Start renaming `node`, seeding the pending text with its current name.
    ///
    /// # Returns
    /// `false`, leaving the state untouched, if `node` is not in `tree`.
    pub fn begin_edit(&mut self, tree: &Tree, node: NodeId) -> bool {
        let Some(found) = tree.get(node) else {
            return false;
        };
        self.current = Interaction::Editing {
            node,
            pending: found.name().to_string(),
        };
        true
    }

    /// Replace the pending text of the rename in progress.
    ///
    /// # Returns
    /// `false` if no rename is in progress.
    pub fn update_edit(&mut self, text: &str) -> bool {
        let Interaction::Editing { pending, .. } = &mut self.current else {
            return false;
        };
        pending.clear();
        pending.push_str(text);
        true
    }

    /// Finish the rename in progress and return the resulting snapshot.
    ///
    /// Without a rename in progress, or when the rename is a no-op, the
    /// returned snapshot shares `tree`'s root.
    pub fn commit_edit(&mut self, tree: &Tree) -> Tree {
        match core::mem::take(&mut self.current) {
            Interaction::Editing { node, pending } => tree.rename(node, &pending),
            other => {
                self.current = other;
                tree.clone()
            }
        }
    }

    /// Abandon the rename in progress.
    ///
    /// # Returns
    /// `true` if a rename was in progress.
    pub fn cancel_edit(&mut self) -> bool {
        if self.editing().is_some() {
            self.current = Interaction::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_tree::TreeNode;

    const ROOT: NodeId = NodeId(0);
    const DOCS: NodeId = NodeId(1);
    const GUIDE: NodeId = NodeId(2);
    const SRC: NodeId = NodeId(3);
    const README: NodeId = NodeId(4);

    fn sample() -> Tree {
        Tree::new(TreeNode::folder(
            ROOT,
            "repo",
            [
                TreeNode::folder(DOCS, "docs", [TreeNode::folder(GUIDE, "guide", [])]),
                TreeNode::folder(SRC, "src", []),
                TreeNode::file(README, "README.md"),
            ],
        ))
    }

    #[test]
    fn hover_tracks_only_valid_targets() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.on_drag_start(DOCS);

        // Own descendant: would create a cycle.
        assert!(!state.on_drag_over(&tree, GUIDE));
        assert_eq!(state.drop_target(), None);

        assert!(state.on_drag_over(&tree, SRC));
        assert_eq!(state.drop_target(), Some(SRC));

        // Moving onto a file clears the previous candidate.
        assert!(!state.on_drag_over(&tree, README));
        assert_eq!(state.drop_target(), None);

        state.on_drag_over(&tree, SRC);
        state.on_drag_leave();
        assert_eq!(state.drop_target(), None);
        assert_eq!(state.dragged(), Some(DOCS));
    }

    #[test]
    fn hover_without_drag_is_ignored() {
        let tree = sample();
        let mut state = InteractionState::new();
        assert!(!state.on_drag_over(&tree, SRC));
        assert!(state.is_idle());
    }

    #[test]
    fn drop_moves_and_returns_to_idle() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.on_drag_start(README);
        let DropOutcome::Moved(next) = state.on_drop(&tree, DOCS) else {
            panic!("valid drop must move");
        };
        assert_eq!(next.parent_of(README), Some(DOCS));
        assert!(state.is_idle());
    }

    #[test]
    fn rejected_drop_still_clears_the_drag() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.on_drag_start(DOCS);
        assert_eq!(
            state.on_drop(&tree, GUIDE),
            DropOutcome::Rejected(MoveError::TargetInsideDragged)
        );
        assert!(state.is_idle());
        assert_eq!(state.on_drop(&tree, SRC), DropOutcome::NotDragging);

        // A stray drop does not end a rename.
        state.begin_edit(&tree, SRC);
        assert_eq!(state.on_drop(&tree, DOCS), DropOutcome::NotDragging);
        assert_eq!(state.editing(), Some((SRC, "src")));
    }

    #[test]
    fn drop_revalidates_against_the_current_snapshot() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.on_drag_start(README);
        assert!(state.on_drag_over(&tree, SRC));

        // `src` is deleted by another action before the drop lands.
        let tree = tree.delete([SRC]);
        assert_eq!(
            state.on_drop(&tree, SRC),
            DropOutcome::Rejected(MoveError::NotFound(SRC))
        );
    }

    #[test]
    fn new_drag_replaces_the_old_one() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.on_drag_start(DOCS);
        state.on_drag_over(&tree, SRC);
        state.on_drag_start(README);
        assert_eq!(state.dragged(), Some(README));
        assert_eq!(state.drop_target(), None);
        assert!(state.on_drag_end());
        assert!(!state.on_drag_end());
    }

    #[test]
    fn rename_commit_trims_and_goes_idle() {
        let tree = sample();
        let mut state = InteractionState::new();
        assert!(state.begin_edit(&tree, SRC));
        assert_eq!(state.editing(), Some((SRC, "src")));
        assert!(state.update_edit("  lib "));
        let next = state.commit_edit(&tree);
        assert_eq!(next.get(SRC).unwrap().name(), "lib");
        assert!(state.is_idle());
    }

    #[test]
    fn rename_of_unknown_node_does_not_start() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.on_drag_start(DOCS);
        assert!(!state.begin_edit(&tree, NodeId(42)));
        assert_eq!(state.dragged(), Some(DOCS), "drag is left alone");
    }

    #[test]
    fn gestures_are_exclusive() {
        let tree = sample();
        let mut state = InteractionState::new();
        state.begin_edit(&tree, SRC);
        state.update_edit("half-typed");

        // Starting a drag discards the edit.
        state.on_drag_start(README);
        assert_eq!(state.editing(), None);
        assert!(!state.update_edit("more"));
        assert!(state.commit_edit(&tree).ptr_eq(&tree));
        assert_eq!(state.dragged(), Some(README), "commit keeps the drag");

        // Starting an edit abandons the drag.
        state.begin_edit(&tree, DOCS);
        assert_eq!(state.dragged(), None);
        assert!(state.cancel_edit());
        assert!(!state.cancel_edit());
        assert!(state.is_idle());
    }
}
