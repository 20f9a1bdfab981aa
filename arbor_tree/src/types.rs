// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree model: node identifiers, kinds, and nodes.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Opaque identifier of a node.
///
/// Ids are assigned by whoever builds the tree and must be unique within it.
/// They stay stable across every edit, including renames.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u64);

impl NodeId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Whether a node is a container or a leaf.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    /// May own children.
    Folder,
    /// Never owns children.
    File,
}

/// Target state for batch expand/collapse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpandState {
    /// Children visible.
    Expanded,
    /// Children hidden.
    Collapsed,
}

impl ExpandState {
    /// `true` for [`ExpandState::Expanded`].
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// A node of the folder/file hierarchy.
///
/// Nodes are immutable once built. Children are reference counted so that an
/// edit can rebuild only the path from the root to the edited node and share
/// every other subtree with the previous snapshot.
///
/// Only [`NodeKind::Folder`] nodes own children; the constructors enforce this,
/// and so does deserialization, which rejects a file that lists children.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTreeNode"))]
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub(crate) children: Vec<Arc<TreeNode>>,
    pub(crate) path: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "expanded", skip_serializing_if = "Option::is_none")
    )]
    pub(crate) expanded_hint: Option<bool>,
}

/// Node data as it appears on the wire, before the kind/children check.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTreeNode {
    id: NodeId,
    name: String,
    kind: NodeKind,
    #[serde(default)]
    children: Vec<Arc<TreeNode>>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default, rename = "expanded")]
    expanded_hint: Option<bool>,
}

/// Why deserialized node data was rejected.
#[cfg(feature = "serde")]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeNodeError {
    /// A node of kind file listed children.
    FileWithChildren(NodeId),
}

#[cfg(feature = "serde")]
impl core::fmt::Display for TreeNodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FileWithChildren(id) => write!(f, "file {} has children", id.get()),
        }
    }
}

#[cfg(feature = "serde")]
impl core::error::Error for TreeNodeError {}

#[cfg(feature = "serde")]
impl TryFrom<RawTreeNode> for TreeNode {
    type Error = TreeNodeError;

    fn try_from(raw: RawTreeNode) -> Result<Self, Self::Error> {
        if raw.kind == NodeKind::File && !raw.children.is_empty() {
            return Err(TreeNodeError::FileWithChildren(raw.id));
        }
        Ok(Self {
            id: raw.id,
            path: raw.path.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            kind: raw.kind,
            children: raw.children,
            expanded_hint: raw.expanded_hint,
        })
    }
}

impl TreeNode {
    /// Create a folder owning `children` in the given left-to-right order.
    ///
    /// The display path defaults to `name`; see [`TreeNode::with_path`].
    pub fn folder(
        id: NodeId,
        name: impl Into<String>,
        children: impl IntoIterator<Item = Self>,
    ) -> Self {
        let name = name.into();
        Self {
            id,
            path: name.clone(),
            name,
            kind: NodeKind::Folder,
            children: children.into_iter().map(Arc::new).collect(),
            expanded_hint: None,
        }
    }

    /// Create a file.
    pub fn file(id: NodeId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            path: name.clone(),
            name,
            kind: NodeKind::File,
            children: Vec::new(),
            expanded_hint: None,
        }
    }

    /// Replace the cosmetic display path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the persisted expansion hint.
    #[must_use]
    pub fn with_expanded_hint(mut self, hint: Option<bool>) -> Self {
        self.expanded_hint = hint;
        self
    }

    /// Identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folder or file.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// `true` for folders.
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Children in sibling order. Always empty for files.
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    /// Cosmetic display path. Not unique, never used for lookup.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The persisted expansion hint, if one was recorded.
    pub fn expanded_hint(&self) -> Option<bool> {
        self.expanded_hint
    }

    /// Whether this node starts out expanded: anything but an explicit `false` hint.
    pub fn starts_expanded(&self) -> bool {
        self.expanded_hint != Some(false)
    }

    /// Copy this node's own fields over a new child list.
    pub(crate) fn with_children(&self, children: Vec<Arc<Self>>) -> Self {
        debug_assert!(
            self.is_folder() || children.is_empty(),
            "files never own children"
        );
        Self {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            children,
            path: self.path.clone(),
            expanded_hint: self.expanded_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn constructors_default_path_to_name() {
        let file = TreeNode::file(NodeId(1), "main.rs");
        assert_eq!(file.path(), "main.rs");
        assert_eq!(file.kind(), NodeKind::File);
        assert!(file.children().is_empty());

        let folder = TreeNode::folder(NodeId(2), "src", vec![file]).with_path("app/src");
        assert_eq!(folder.path(), "app/src");
        assert_eq!(folder.children().len(), 1);
    }

    #[test]
    fn only_explicit_false_hint_starts_collapsed() {
        let open = TreeNode::folder(NodeId(1), "a", []);
        assert!(open.starts_expanded());
        let hinted = open.clone().with_expanded_hint(Some(true));
        assert!(hinted.starts_expanded());
        assert!(!open.with_expanded_hint(Some(false)).starts_expanded());
    }
}
