//! Presentation node for the file tree

use crate::store::{NodeRecord, NodeType};
use crate::tree::path;
use crate::types::Timestamp;
use serde::Serialize;

/// A node of the derived, never-persisted file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub size: u64,
    pub last_modified: Timestamp,
    /// Present for folders only, ordered folders-first then by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn from_record(record: &NodeRecord) -> Self {
        Self {
            name: path::name_of(&record.path).to_string(),
            path: record.path.clone(),
            node_type: record.node_type,
            size: record.size,
            last_modified: record.last_modified,
            children: match record.node_type {
                NodeType::Folder => Some(Vec::new()),
                NodeType::File => None,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Children of a folder; empty for files.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth-first search for the node at `path` within this subtree.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }
}
