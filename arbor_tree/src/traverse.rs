// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal and copy-on-write helpers shared by queries and edits.
//!
//! Everything here walks with an explicit stack, so the depth of a tree is
//! bounded by the heap rather than the call stack.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::{NodeId, NodeKind, TreeNode};

/// Child indices leading from a root to one of its descendants.
pub(crate) type IndexPath = SmallVec<[usize; 8]>;

/// Depth-first, pre-order iterator over a subtree.
///
/// Yields `(depth, node)` where the starting node has depth `0`.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(root: &'a TreeNode) -> Self {
        Self {
            stack: vec![(0, root)],
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, &**c)));
        Some((depth, node))
    }
}

/// Counts gathered over a subtree, the subtree root included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtreeStats {
    /// Number of file nodes.
    pub files: usize,
    /// Number of folder nodes.
    pub folders: usize,
    /// Deepest level below the subtree root (`0` for a lone node).
    pub depth: usize,
}

impl TreeNode {
    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Ids of this node and all descendants, in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().map(|(_, n)| n.id)
    }

    /// Number of nodes in this subtree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always `false`: a subtree contains at least its own root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Find a node by id within this subtree.
    pub fn find(&self, id: NodeId) -> Option<&Self> {
        self.iter().map(|(_, n)| n).find(|n| n.id == id)
    }

    /// Whether `id` is this node or one of its descendants.
    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Id of the parent of `id`, or `None` for this node itself and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.iter()
            .map(|(_, n)| n)
            .find(|n| n.children.iter().any(|c| c.id == id))
            .map(|n| n.id)
    }

    /// Ids from this node down to `id`, both inclusive.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let indices = locate(self, id)?;
        let mut ids = Vec::with_capacity(indices.len() + 1);
        let mut node = self;
        ids.push(node.id);
        for &i in &indices {
            node = &*node.children[i];
            ids.push(node.id);
        }
        Some(ids)
    }

    /// File and folder counts plus maximum depth of this subtree.
    pub fn stats(&self) -> SubtreeStats {
        self.iter()
            .fold(SubtreeStats::default(), |mut stats, (depth, node)| {
                match node.kind {
                    NodeKind::File => stats.files += 1,
                    NodeKind::Folder => stats.folders += 1,
                }
                stats.depth = stats.depth.max(depth);
                stats
            })
    }
}

/// Find the child-index path from `root` to `id`.
pub(crate) fn locate(root: &TreeNode, id: NodeId) -> Option<IndexPath> {
    if root.id == id {
        return Some(IndexPath::new());
    }
    // Each frame records the index of the next child to visit, so `next - 1`
    // is the child currently being descended into.
    let mut stack: Vec<(&TreeNode, usize)> = vec![(root, 0)];
    while let Some(top) = stack.last_mut() {
        let (node, next) = *top;
        let Some(child) = node.children.get(next) else {
            stack.pop();
            continue;
        };
        top.1 += 1;
        if child.id == id {
            return Some(stack.iter().map(|&(_, next)| next - 1).collect());
        }
        stack.push((&**child, 0));
    }
    None
}

/// The node reached by following `path` from `root`.
pub(crate) fn arc_at<'a>(root: &'a Arc<TreeNode>, path: &[usize]) -> &'a Arc<TreeNode> {
    path.iter().fold(root, |node, &i| &node.children[i])
}

/// Rebuild every ancestor along `path` so that the node it reaches becomes
/// `replacement`. Subtrees off the path are shared with `root`.
pub(crate) fn replace_at(
    root: &Arc<TreeNode>,
    path: &[usize],
    replacement: Arc<TreeNode>,
) -> Arc<TreeNode> {
    let mut chain: SmallVec<[&Arc<TreeNode>; 8]> = SmallVec::with_capacity(path.len());
    let mut node = root;
    for &i in path {
        chain.push(node);
        node = &node.children[i];
    }
    chain
        .iter()
        .zip(path)
        .rev()
        .fold(replacement, |child, (ancestor, &i)| {
            let mut children = ancestor.children.clone();
            children[i] = child;
            Arc::new(ancestor.with_children(children))
        })
}

/// Remove the node reached by `path`, keeping the order of its siblings.
///
/// Returns `None` for the empty path: the root cannot be detached.
pub(crate) fn remove_at(root: &Arc<TreeNode>, path: &[usize]) -> Option<Arc<TreeNode>> {
    let (&index, parent_path) = path.split_last()?;
    let parent = arc_at(root, parent_path);
    let mut children = parent.children.clone();
    children.remove(index);
    Some(replace_at(
        root,
        parent_path,
        Arc::new(parent.with_children(children)),
    ))
}

/// A whole-tree rewrite applied bottom-up by [`rewrite`].
pub(crate) trait Rewrite {
    /// Whether `node`, together with its subtree, is dropped from its parent.
    fn prune(&mut self, node: &TreeNode) -> bool;

    /// An updated copy of `node`'s own fields, or `None` to keep them.
    ///
    /// The children of the returned node are replaced by the rewritten ones.
    fn patch(&mut self, node: &TreeNode) -> Option<TreeNode>;
}

struct Frame<'a> {
    node: &'a Arc<TreeNode>,
    next: usize,
    children: Vec<Arc<TreeNode>>,
    changed: bool,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Arc<TreeNode>) -> Self {
        Self {
            node,
            next: 0,
            children: Vec::with_capacity(node.children.len()),
            changed: false,
        }
    }

    fn finish(self, rw: &mut impl Rewrite) -> Arc<TreeNode> {
        match (rw.patch(self.node), self.changed) {
            (None, false) => Arc::clone(self.node),
            (Some(mut node), changed) => {
                if changed {
                    node.children = self.children;
                }
                Arc::new(node)
            }
            (None, true) => Arc::new(self.node.with_children(self.children)),
        }
    }
}

/// Apply `rw` to every node under `root`, post-order.
///
/// `root` itself is never pruned. Subtrees the rewrite leaves alone are
/// returned by reference, and an unchanged tree comes back as the same `Arc`.
pub(crate) fn rewrite(root: &Arc<TreeNode>, rw: &mut impl Rewrite) -> Arc<TreeNode> {
    let mut stack = vec![Frame::new(root)];
    while let Some(top) = stack.last_mut() {
        let node = top.node;
        if let Some(child) = node.children.get(top.next) {
            top.next += 1;
            if rw.prune(child) {
                top.changed = true;
            } else {
                stack.push(Frame::new(child));
            }
            continue;
        }
        let Some(frame) = stack.pop() else {
            break;
        };
        let original = frame.node;
        let done = frame.finish(&mut *rw);
        match stack.last_mut() {
            Some(parent) => {
                parent.changed |= !Arc::ptr_eq(&done, original);
                parent.children.push(done);
            }
            None => return done,
        }
    }
    Arc::clone(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<TreeNode> {
        // 1 ─┬─ 2 ─┬─ 3
        //    │     └─ 4
        //    └─ 5 ─── 6
        Arc::new(TreeNode::folder(
            NodeId(1),
            "root",
            [
                TreeNode::folder(
                    NodeId(2),
                    "a",
                    [
                        TreeNode::file(NodeId(3), "a.txt"),
                        TreeNode::file(NodeId(4), "b.txt"),
                    ],
                ),
                TreeNode::folder(NodeId(5), "b", [TreeNode::file(NodeId(6), "c.txt")]),
            ],
        ))
    }

    #[test]
    fn iter_is_pre_order_with_depths() {
        let root = sample();
        let seen: Vec<(usize, u64)> = root.iter().map(|(d, n)| (d, n.id().get())).collect();
        assert_eq!(seen, vec![(0, 1), (1, 2), (2, 3), (2, 4), (1, 5), (2, 6)]);
    }

    #[test]
    fn locate_and_path_to() {
        let root = sample();
        assert!(locate(&root, NodeId(1)).unwrap().is_empty());
        assert_eq!(locate(&root, NodeId(4)).unwrap().as_slice(), &[0, 1]);
        assert_eq!(locate(&root, NodeId(6)).unwrap().as_slice(), &[1, 0]);
        assert!(locate(&root, NodeId(99)).is_none());
        assert_eq!(
            root.path_to(NodeId(6)).unwrap(),
            vec![NodeId(1), NodeId(5), NodeId(6)]
        );
    }

    #[test]
    fn parent_of_and_stats() {
        let root = sample();
        assert_eq!(root.parent_of(NodeId(4)), Some(NodeId(2)));
        assert_eq!(root.parent_of(NodeId(1)), None);
        assert_eq!(root.parent_of(NodeId(42)), None);
        assert_eq!(
            root.stats(),
            SubtreeStats {
                files: 3,
                folders: 3,
                depth: 2,
            }
        );
        assert_eq!(root.find(NodeId(6)).unwrap().stats().depth, 0);
    }

    #[test]
    fn replace_at_shares_untouched_siblings() {
        let root = sample();
        let replacement = Arc::new(TreeNode::file(NodeId(4), "renamed"));
        let next = replace_at(&root, &[0, 1], replacement);
        assert_eq!(next.find(NodeId(4)).unwrap().name(), "renamed");
        assert!(Arc::ptr_eq(&next.children[1], &root.children[1]));
        let (old_a, new_a) = (&root.children[0], &next.children[0]);
        assert!(Arc::ptr_eq(&new_a.children[0], &old_a.children[0]));
        // The original is untouched.
        assert_eq!(root.find(NodeId(4)).unwrap().name(), "b.txt");
    }

    #[test]
    fn remove_at_keeps_sibling_order_and_refuses_root() {
        let root = sample();
        let next = remove_at(&root, &[0, 0]).unwrap();
        let names: Vec<&str> = next.children[0].children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b.txt"]);
        assert!(remove_at(&root, &[]).is_none());
    }

    struct DropFiles;

    impl Rewrite for DropFiles {
        fn prune(&mut self, node: &TreeNode) -> bool {
            !node.is_folder()
        }

        fn patch(&mut self, _node: &TreeNode) -> Option<TreeNode> {
            None
        }
    }

    struct Nothing;

    impl Rewrite for Nothing {
        fn prune(&mut self, _node: &TreeNode) -> bool {
            false
        }

        fn patch(&mut self, _node: &TreeNode) -> Option<TreeNode> {
            None
        }
    }

    #[test]
    fn rewrite_prunes_bottom_up_and_shares_when_unchanged() {
        let root = sample();
        let pruned = rewrite(&root, &mut DropFiles);
        let ids: Vec<u64> = pruned.ids().map(NodeId::get).collect();
        assert_eq!(ids, vec![1, 2, 5]);

        let same = rewrite(&root, &mut Nothing);
        assert!(Arc::ptr_eq(&same, &root), "no-op keeps the same root");
    }
}
