//! Agent–file system tool contract.
//!
//! The complete surface an automated assistant may use. Mutations report a
//! human-readable outcome instead of an error so the message can be handed
//! straight back to the model.

use crate::error::FsError;
use crate::store::NodeType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a tool call as reported to the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    pub message: String,
}

impl ToolOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A resource file offered as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFile {
    pub path: String,
    pub content: String,
}

#[async_trait]
pub trait AgentFileTools: Send + Sync {
    /// Create a file or folder. `content` is only meaningful for files.
    async fn create_node(
        &self,
        path: &str,
        node_type: NodeType,
        content: Option<String>,
    ) -> ToolOutcome;

    /// Replace the content of an existing file.
    async fn edit_file(&self, path: &str, content: String) -> ToolOutcome;

    /// Copy a node and its sub-tree to a fresh sibling path.
    async fn duplicate_node(&self, path: &str) -> ToolOutcome;

    /// Text content of every file under the resource prefix.
    async fn list_resource_files(&self) -> Result<Vec<ResourceFile>, FsError>;
}
