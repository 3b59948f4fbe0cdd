//! Tree node entity

use serde::{Deserialize, Serialize};

/// Name of the synthetic directory returned for empty or unrecognized documents.
pub const EMPTY_ROOT_NAME: &str = "empty";

/// Name of the synthetic root introduced when a flat list has several top-level names.
pub const VIRTUAL_ROOT_NAME: &str = "__virtual_root__";

/// One file or directory with its ordered children.
///
/// `path` is informational: real paths for filesystem scans, virtual `/`-joined paths
/// for archive and deserialized trees. It is not a key.
///
/// Children keep scan/insertion order. A file node never has children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a directory node without children
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
            size: None,
            children: Vec::new(),
        }
    }

    /// Create a file node
    pub fn file(name: impl Into<String>, path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            size,
            children: Vec::new(),
        }
    }

    /// The synthetic `"empty"` directory.
    pub fn empty() -> Self {
        Self::directory(EMPTY_ROOT_NAME, "")
    }

    /// The synthetic `"__virtual_root__"` directory.
    pub fn virtual_root() -> Self {
        Self::directory(VIRTUAL_ROOT_NAME, "")
    }

    /// Append a child, keeping insertion order.
    ///
    /// Attaching to a file turns it into a directory; its recorded size no longer
    /// applies.
    pub fn add_child(&mut self, child: TreeNode) {
        if !self.is_dir {
            self.promote_to_directory();
        }
        self.children.push(child);
    }

    /// Mark this node as a directory and drop the file-only size.
    pub fn promote_to_directory(&mut self) {
        self.is_dir = true;
        self.size = None;
    }

    pub fn is_virtual_root(&self) -> bool {
        self.is_dir && self.name == VIRTUAL_ROOT_NAME
    }

    /// Number of file nodes in this subtree (including self)
    pub fn file_count(&self) -> usize {
        if self.is_dir {
            self.children.iter().map(TreeNode::file_count).sum()
        } else {
            1
        }
    }

    /// Number of directory nodes in this subtree (including self)
    pub fn directory_count(&self) -> usize {
        if self.is_dir {
            1 + self
                .children
                .iter()
                .map(TreeNode::directory_count)
                .sum::<usize>()
        } else {
            0
        }
    }

    /// Compare name, kind and children recursively, ignoring `path` and `size`.
    pub fn same_shape(&self, other: &TreeNode) -> bool {
        self.name == other.name
            && self.is_dir == other.is_dir
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|(a, b)| a.same_shape(b))
    }
}
