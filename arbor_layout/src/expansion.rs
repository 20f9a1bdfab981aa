// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transient set of folders whose children are shown.

use arbor_tree::{ExpandState, NodeId, TreeNode};
use hashbrown::HashSet;

/// Ids of folders currently shown open.
///
/// This is presentation state layered over a tree, not part of it. It is
/// seeded once from the tree's expansion hints and then follows user toggles.
/// Ids that no longer exist in the tree are harmless: the layout only looks up
/// ids of nodes it actually visits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    ids: HashSet<NodeId>,
}

impl ExpansionSet {
    /// Create an empty set: everything below the root is hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from persisted hints: every folder whose hint is not an explicit
    /// `false` starts open.
    pub fn from_tree(root: &TreeNode) -> Self {
        root.iter()
            .map(|(_, node)| node)
            .filter(|node| node.is_folder() && node.starts_expanded())
            .map(TreeNode::id)
            .collect()
    }

    /// Whether `id` is open.
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Open `id`. Returns `true` if it was closed.
    pub fn expand(&mut self, id: NodeId) -> bool {
        self.ids.insert(id)
    }

    /// Close `id`. Returns `true` if it was open.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        self.ids.remove(&id)
    }

    /// Flip a folder between open and closed.
    ///
    /// Returns the new state, or `None` for files, which have nothing to show.
    pub fn toggle(&mut self, node: &TreeNode) -> Option<ExpandState> {
        if !node.is_folder() {
            return None;
        }
        if self.ids.remove(&node.id()) {
            Some(ExpandState::Collapsed)
        } else {
            self.ids.insert(node.id());
            Some(ExpandState::Expanded)
        }
    }

    /// Open or close every id in `ids`.
    pub fn apply(&mut self, ids: impl IntoIterator<Item = NodeId>, state: ExpandState) {
        match state {
            ExpandState::Expanded => self.ids.extend(ids),
            ExpandState::Collapsed => {
                for id in ids {
                    self.ids.remove(&id);
                }
            }
        }
    }

    /// Drop ids that are no longer folders under `root`.
    pub fn retain_live(&mut self, root: &TreeNode) {
        let live: HashSet<NodeId> = root
            .iter()
            .filter(|(_, node)| node.is_folder())
            .map(|(_, node)| node.id())
            .collect();
        self.ids.retain(|id| live.contains(id));
    }

    /// Number of open ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is open.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate open ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<NodeId> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<NodeId> for ExpansionSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::folder(
            NodeId(0),
            "root",
            [
                TreeNode::folder(NodeId(1), "open", [TreeNode::file(NodeId(2), "a.txt")])
                    .with_expanded_hint(Some(true)),
                TreeNode::folder(NodeId(3), "closed", []).with_expanded_hint(Some(false)),
                TreeNode::file(NodeId(4), "b.txt"),
            ],
        )
    }

    #[test]
    fn seeds_folders_without_an_explicit_false_hint() {
        let set = ExpansionSet::from_tree(&sample());
        assert!(set.contains(NodeId(0)));
        assert!(set.contains(NodeId(1)));
        assert!(!set.contains(NodeId(3)));
        assert!(!set.contains(NodeId(4)), "files are never seeded");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn toggle_flips_folders_and_ignores_files() {
        let root = sample();
        let mut set = ExpansionSet::new();
        let closed = root.find(NodeId(3)).unwrap();
        assert_eq!(set.toggle(closed), Some(ExpandState::Expanded));
        assert!(set.contains(NodeId(3)));
        assert_eq!(set.toggle(closed), Some(ExpandState::Collapsed));
        assert!(!set.contains(NodeId(3)));
        assert_eq!(set.toggle(root.find(NodeId(4)).unwrap()), None);
        assert!(set.is_empty());
    }

    #[test]
    fn apply_and_retain_live() {
        let root = sample();
        let mut set = ExpansionSet::from_tree(&root);
        set.apply([NodeId(3), NodeId(99)], ExpandState::Expanded);
        assert!(set.contains(NodeId(99)), "stale ids are tolerated");
        set.retain_live(&root);
        assert!(!set.contains(NodeId(99)));
        assert!(set.contains(NodeId(3)));
        set.apply([NodeId(0), NodeId(1)], ExpandState::Collapsed);
        let open: alloc::vec::Vec<_> = set.iter().collect();
        assert_eq!(open, alloc::vec![NodeId(3)]);
    }
}
