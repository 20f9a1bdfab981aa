// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tree snapshot together with its open folders, gesture state, and layout.

use alloc::vec::Vec;

use arbor_layout::{ExpansionSet, Layout, LayoutConfig, LayoutEngine};
use arbor_tree::{Edit, ExpandState, NodeId, SubtreeStats, Tree, TreeNode};

use crate::session::{DropOutcome, InteractionState};

/// Everything a host needs to show and edit one tree diagram.
///
/// `TreeView` owns the current [`Tree`] snapshot and keeps the cached
/// [`Layout`] in step with it. Methods that change the tree return the new
/// snapshot (`Some`) so the host can hand it to persistence; `None` means the
/// tree did not change. Toggling a folder only changes what is shown and never
/// produces a snapshot.
///
/// ## Example
///
/// ```rust
/// use arbor_interaction::TreeView;
/// use arbor_layout::LayoutConfig;
/// use arbor_tree::{NodeId, Tree, TreeNode};
///
/// let tree = Tree::new(TreeNode::folder(
///     NodeId(0),
///     "src",
///     [
///         TreeNode::folder(NodeId(1), "components", [TreeNode::file(NodeId(2), "Header.tsx")]),
///         TreeNode::folder(NodeId(3), "pages", []),
///     ],
/// ));
/// let mut view = TreeView::new(tree, LayoutConfig::default());
/// assert_eq!(view.layout().len(), 4);
///
/// // Hide the contents of `components`; the tree itself is unchanged.
/// view.toggle(NodeId(1));
/// assert!(!view.layout().is_visible(NodeId(2)));
///
/// // Drag `components` onto `pages`.
/// view.drag_start(NodeId(1));
/// assert!(view.drag_over(NodeId(3)));
/// let saved = view.drop_on(NodeId(3)).expect("valid move");
/// assert_eq!(saved.parent_of(NodeId(1)), Some(NodeId(3)));
/// ```
#[derive(Clone, Debug)]
pub struct TreeView {
    tree: Tree,
    expanded: ExpansionSet,
    engine: LayoutEngine,
    interaction: InteractionState,
    layout: Layout,
}

impl TreeView {
    /// Show `tree`, opening every folder its hints do not mark closed.
    pub fn new(tree: Tree, config: LayoutConfig) -> Self {
        let expanded = ExpansionSet::from_tree(tree.root());
        let engine = LayoutEngine::new(config);
        let layout = engine.compute(tree.root_arc(), &expanded);
        Self {
            tree,
            expanded,
            engine,
            interaction: InteractionState::new(),
            layout,
        }
    }

    /// Replace the tree with a freshly loaded one.
    ///
    /// Open folders are re-seeded from the new tree's hints and any gesture in
    /// progress is dropped.
    pub fn reload(&mut self, tree: Tree) {
        self.expanded = ExpansionSet::from_tree(tree.root());
        self.tree = tree;
        self.interaction = InteractionState::new();
        self.relayout();
    }

    /// The current snapshot.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Folders currently shown open.
    pub fn expansion(&self) -> &ExpansionSet {
        &self.expanded
    }

    /// The layout of the current snapshot.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The gesture in progress.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Layout geometry in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.engine.config
    }

    /// Change layout geometry and lay out again.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.engine = LayoutEngine::new(config);
        self.relayout();
    }

    /// Counts for a details panel, or `None` if `id` is not in the tree.
    pub fn stats(&self, id: NodeId) -> Option<SubtreeStats> {
        self.tree.get(id).map(TreeNode::stats)
    }

    /// Apply one edit.
    ///
    /// Deleting also forgets deleted folders in the open set, and
    /// [`Edit::SetExpanded`] goes through [`TreeView::set_expanded`].
    pub fn apply(&mut self, edit: &Edit) -> Option<Tree> {
        if let Edit::SetExpanded { ids, state } = edit {
            return self.set_expanded(ids.iter().copied(), *state);
        }
        let next = self.tree.apply(edit);
        if next.ptr_eq(&self.tree) {
            return None;
        }
        if matches!(edit, Edit::Delete(_)) {
            self.expanded.retain_live(next.root());
        }
        Some(self.replace(next))
    }

    /// Rename a node. See [`Tree::rename`].
    pub fn rename(&mut self, id: NodeId, name: &str) -> Option<Tree> {
        let next = self.tree.rename(id, name);
        self.replace_if_changed(next)
    }

    /// Delete nodes with their subtrees. See [`Tree::delete`].
    pub fn delete(&mut self, ids: impl IntoIterator<Item = NodeId>) -> Option<Tree> {
        let next = self.tree.delete(ids);
        if next.ptr_eq(&self.tree) {
            return None;
        }
        self.expanded.retain_live(next.root());
        Some(self.replace(next))
    }

    /// Open or close folders both on screen and in the persisted hints.
    ///
    /// Ids that are not folders in the current tree are ignored. The layout is
    /// refreshed even when the hints already matched.
    pub fn set_expanded(
        &mut self,
        ids: impl IntoIterator<Item = NodeId>,
        state: ExpandState,
    ) -> Option<Tree> {
        let ids: Vec<NodeId> = ids
            .into_iter()
            .filter(|&id| self.tree.get(id).is_some_and(TreeNode::is_folder))
            .collect();
        self.expanded.apply(ids.iter().copied(), state);
        let next = self.tree.set_expanded(ids, state);
        if next.ptr_eq(&self.tree) {
            self.relayout();
            return None;
        }
        Some(self.replace(next))
    }

    /// Flip a folder between shown open and closed.
    ///
    /// Only the on-screen state changes. Returns the new state, or `None` if
    /// `id` is not a folder in the tree.
    pub fn toggle(&mut self, id: NodeId) -> Option<ExpandState> {
        let state = self.expanded.toggle(self.tree.get(id)?)?;
        self.relayout();
        Some(state)
    }

    /// Start dragging `id`. Returns `false` if it is not in the tree.
    pub fn drag_start(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.interaction.on_drag_start(id);
        true
    }

    /// The pointer is over `id` during a drag. Returns whether a drop there
    /// would be accepted.
    pub fn drag_over(&mut self, id: NodeId) -> bool {
        self.interaction.on_drag_over(&self.tree, id)
    }

    /// The pointer left the hovered node.
    pub fn drag_leave(&mut self) {
        self.interaction.on_drag_leave();
    }

    /// The drag ended without a drop.
    pub fn drag_end(&mut self) {
        self.interaction.on_drag_end();
    }

    /// Drop the dragged node onto `target`, returning the new snapshot if the
    /// move was accepted.
    pub fn drop_on(&mut self, target: NodeId) -> Option<Tree> {
        match self.interaction.on_drop(&self.tree, target) {
            DropOutcome::Moved(next) => Some(self.replace(next)),
            DropOutcome::Rejected(_) | DropOutcome::NotDragging => None,
        }
    }

    /// Start renaming `id` in place. Returns `false` if it is not in the tree.
    pub fn begin_rename(&mut self, id: NodeId) -> bool {
        self.interaction.begin_edit(&self.tree, id)
    }

    /// Replace the text of the rename in progress.
    pub fn update_rename(&mut self, text: &str) -> bool {
        self.interaction.update_edit(text)
    }

    /// Finish the rename in progress.
    pub fn commit_rename(&mut self) -> Option<Tree> {
        let next = self.interaction.commit_edit(&self.tree);
        self.replace_if_changed(next)
    }

    /// Abandon the rename in progress.
    pub fn cancel_rename(&mut self) -> bool {
        self.interaction.cancel_edit()
    }

    fn replace_if_changed(&mut self, next: Tree) -> Option<Tree> {
        if next.ptr_eq(&self.tree) {
            None
        } else {
            Some(self.replace(next))
        }
    }

    fn replace(&mut self, next: Tree) -> Tree {
        self.tree = next.clone();
        self.relayout();
        next
    }

    fn relayout(&mut self) {
        self.layout = self.engine.compute(self.tree.root_arc(), &self.expanded);
    }
}
