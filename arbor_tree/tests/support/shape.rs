// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree builder shared by the property tests of every Arbor crate.
//!
//! Lives under `tests/support/` so Cargo does not compile it as a test target
//! of its own; each suite pulls it in with `#[path]`.

use arbor_tree::{NodeId, Tree, TreeNode};

/// Build a tree from `(parent pick, is folder)` pairs. Node `0` is the root
/// folder; node `i` hangs under one of the folders created before it.
pub(crate) fn build(shape: &[(u16, bool)]) -> Tree {
    let mut folders = vec![0_usize];
    let mut children: Vec<Vec<usize>> = vec![Vec::new()];
    let mut is_folder = vec![true];
    for (i, &(pick, folder)) in shape.iter().enumerate() {
        let id = i + 1;
        let parent = folders[pick as usize % folders.len()];
        children[parent].push(id);
        children.push(Vec::new());
        is_folder.push(folder);
        if folder {
            folders.push(id);
        }
    }
    fn node(id: usize, children: &[Vec<usize>], is_folder: &[bool]) -> TreeNode {
        let nid = NodeId(id as u64);
        if is_folder[id] {
            TreeNode::folder(
                nid,
                format!("folder-{id}"),
                children[id].iter().map(|&c| node(c, children, is_folder)),
            )
        } else {
            TreeNode::file(nid, format!("file-{id}.txt"))
        }
    }
    Tree::new(node(0, &children, &is_folder))
}
