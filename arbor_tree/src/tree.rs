// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable tree snapshots and the edits that produce new ones.

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::edit::{Edit, MoveError};
use crate::traverse::{self, Iter, Rewrite};
use crate::types::{ExpandState, NodeId, TreeNode};

/// An immutable snapshot of a folder/file hierarchy.
///
/// Every edit returns a new `Tree`. Only the nodes on the path from the root to
/// an edited node are rebuilt; all other subtrees are shared with the previous
/// snapshot, so cloning and editing stay cheap and old snapshots stay valid.
///
/// Edits never fail. Ids that are not in the tree, blank renames, and moves
/// that [`Tree::validate_move`] rejects all return a snapshot that shares the
/// same root as the input (see [`Tree::ptr_eq`]).
///
/// ## Example
///
/// ```rust
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
///
/// // Drag `Header.tsx` onto `pages`.
/// assert!(tree.validate_move(NodeId(2), NodeId(3)));
/// let moved = tree.reparent(NodeId(2), NodeId(3));
/// assert_eq!(moved.parent_of(NodeId(2)), Some(NodeId(3)));
///
/// // The previous snapshot is untouched.
/// assert_eq!(tree.parent_of(NodeId(2)), Some(NodeId(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    root: Arc<TreeNode>,
}

impl From<TreeNode> for Tree {
    fn from(root: TreeNode) -> Self {
        Self::new(root)
    }
}

impl Tree {
    /// Wrap a root node built by the host.
    pub fn new(root: TreeNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// The root node as a shared handle.
    pub fn root_arc(&self) -> &Arc<TreeNode> {
        &self.root
    }

    /// Whether both snapshots share the same root allocation.
    ///
    /// An edit that changed nothing returns a snapshot for which this is `true`.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Find a node by id.
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.root.find(id)
    }

    /// Whether `id` is anywhere in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.root.contains(id)
    }

    /// Id of the parent of `id`; `None` for the root and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.root.parent_of(id)
    }

    /// Ids from the root down to `id`, both inclusive.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        self.root.path_to(id)
    }

    /// Depth-first, pre-order walk over all nodes.
    pub fn iter(&self) -> Iter<'_> {
        self.root.iter()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Always `false`: there is always a root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Apply one [`Edit`].
    #[must_use]
    pub fn apply(&self, edit: &Edit) -> Self {
        match edit {
            Edit::Rename { id, name } => self.rename(*id, name),
            Edit::Reparent {
                dragged,
                new_parent,
            } => self.reparent(*dragged, *new_parent),
            Edit::Delete(ids) => self.delete(ids.iter().copied()),
            Edit::SetExpanded { ids, state } => self.set_expanded(ids.iter().copied(), *state),
        }
    }

    /// Rename `id` to `new_name.trim()`.
    ///
    /// Blank names, unchanged names, and unknown ids leave the tree as is.
    /// The node keeps its id.
    #[must_use]
    pub fn rename(&self, id: NodeId, new_name: &str) -> Self {
        let name = new_name.trim();
        let Some(path) = traverse::locate(&self.root, id) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(id = id.get(), "rename of unknown node ignored");
            return self.clone();
        };
        let node = traverse::arc_at(&self.root, &path);
        if name.is_empty() || node.name == name {
            return self.clone();
        }
        let mut renamed = node.with_children(node.children.clone());
        renamed.name = name.into();
        Self {
            root: traverse::replace_at(&self.root, &path, Arc::new(renamed)),
        }
    }

    /// Check whether `dragged` may be moved under `target`, and why not.
    ///
    /// A move is rejected when the two ids are equal, either id is unknown, the
    /// target is a file, or the target lies inside the dragged subtree. The
    /// last rule also rejects moving the root, since every node lies inside it.
    pub fn check_move(&self, dragged: NodeId, target: NodeId) -> Result<(), MoveError> {
        if dragged == target {
            return Err(MoveError::SameNode);
        }
        let dragged_node = self.get(dragged).ok_or(MoveError::NotFound(dragged))?;
        let target_node = self.get(target).ok_or(MoveError::NotFound(target))?;
        if !target_node.is_folder() {
            return Err(MoveError::TargetNotFolder);
        }
        if dragged_node.contains(target) {
            return Err(MoveError::TargetInsideDragged);
        }
        Ok(())
    }

    /// Whether `dragged` may be moved under `target`.
    ///
    /// Must hold before [`Tree::reparent`]; see [`Tree::check_move`] for the rules.
    pub fn validate_move(&self, dragged: NodeId, target: NodeId) -> bool {
        self.check_move(dragged, target).is_ok()
    }

    /// Move `dragged`, with its subtree unchanged, to the end of `new_parent`'s children.
    ///
    /// The move is detached first and attached second; the remaining siblings
    /// keep their order. Moves rejected by [`Tree::validate_move`], including
    /// any attempt to move the root, leave the tree as is.
    #[must_use]
    pub fn reparent(&self, dragged: NodeId, new_parent: NodeId) -> Self {
        if let Err(err) = self.check_move(dragged, new_parent) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                dragged = dragged.get(),
                target = new_parent.get(),
                %err,
                "move rejected"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = err;
            return self.clone();
        }
        let Some(from) = traverse::locate(&self.root, dragged) else {
            return self.clone();
        };
        let moved = Arc::clone(traverse::arc_at(&self.root, &from));
        let Some(detached) = traverse::remove_at(&self.root, &from) else {
            return self.clone();
        };
        let Some(to) = traverse::locate(&detached, new_parent) else {
            return self.clone();
        };
        let parent = traverse::arc_at(&detached, &to);
        let mut children = parent.children.clone();
        children.push(moved);
        let attached = Arc::new(parent.with_children(children));
        Self {
            root: traverse::replace_at(&detached, &to, attached),
        }
    }

    /// Remove every node in `ids` together with its subtree.
    ///
    /// Descendants are removed with their ancestor, never promoted. If the root
    /// is among `ids` nothing is removed at all. Unknown ids are ignored.
    #[must_use]
    pub fn delete(&self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        let ids: HashSet<NodeId> = ids.into_iter().collect();
        if ids.is_empty() {
            return self.clone();
        }
        if ids.contains(&self.root.id) {
            #[cfg(feature = "tracing")]
            tracing::debug!(root = self.root.id.get(), "refusing to delete the root");
            return self.clone();
        }
        Self {
            root: traverse::rewrite(&self.root, &mut Prune { ids: &ids }),
        }
    }

    /// Record `state` as the expansion hint of every folder in `ids`.
    ///
    /// Files and nodes outside `ids` keep their hint. This changes persisted
    /// data only; a host that also keeps a transient expansion set must update
    /// it separately.
    #[must_use]
    pub fn set_expanded(&self, ids: impl IntoIterator<Item = NodeId>, state: ExpandState) -> Self {
        let ids: HashSet<NodeId> = ids.into_iter().collect();
        if ids.is_empty() {
            return self.clone();
        }
        let mut hint = Hint {
            ids: &ids,
            hint: state.is_expanded(),
        };
        Self {
            root: traverse::rewrite(&self.root, &mut hint),
        }
    }
}

struct Prune<'a> {
    ids: &'a HashSet<NodeId>,
}

impl Rewrite for Prune<'_> {
    fn prune(&mut self, node: &TreeNode) -> bool {
        self.ids.contains(&node.id)
    }

    fn patch(&mut self, _node: &TreeNode) -> Option<TreeNode> {
        None
    }
}

struct Hint<'a> {
    ids: &'a HashSet<NodeId>,
    hint: bool,
}

impl Rewrite for Hint<'_> {
    fn prune(&mut self, _node: &TreeNode) -> bool {
        false
    }

    fn patch(&mut self, node: &TreeNode) -> Option<TreeNode> {
        if !node.is_folder()
            || node.expanded_hint == Some(self.hint)
            || !self.ids.contains(&node.id)
        {
            return None;
        }
        let mut patched = node.with_children(node.children.clone());
        patched.expanded_hint = Some(self.hint);
        Some(patched)
    }
}
