//! FileSystem-backed implementation of AgentFileTools.
//!
//! Each mutation is checked against the path policy first and only then
//! delegated to the file system, whose own checks still apply. Failures of
//! either kind come back as a failed `ToolOutcome` with a readable reason.

use super::contract::{AgentFileTools, ResourceFile, ToolOutcome};
use crate::agent::policy::{GatedAction, PathPolicy};
use crate::error::FsError;
use crate::store::NodeType;
use crate::vfs::FileSystem;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Policy-restricted view of the file system for an automated caller.
pub struct CapabilityGateway {
    fs: Arc<FileSystem>,
    policy: PathPolicy,
}

impl CapabilityGateway {
    /// Gateway with the default policy (`/Package` writable, `/Resources` readable).
    pub fn new(fs: Arc<FileSystem>) -> Self {
        Self::with_policy(fs, PathPolicy::default())
    }

    pub fn with_policy(fs: Arc<FileSystem>, policy: PathPolicy) -> Self {
        Self { fs, policy }
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    fn reject(&self, action: GatedAction, path: &str, err: FsError) -> ToolOutcome {
        let message = describe_failure(action, path, &err);
        warn!(path, action = action.describe(), reason = %err, "Agent tool call rejected");
        ToolOutcome::failure(message)
    }
}

/// Readable reason for a failed tool call.
fn describe_failure(action: GatedAction, path: &str, err: &FsError) -> String {
    match err {
        FsError::PolicyViolation(message) => message.clone(),
        FsError::DuplicatePath(existing) => format!(
            "Error: A file or folder already exists at path '{}'.",
            existing
        ),
        FsError::NotFound(_) => match action {
            GatedAction::Edit => format!("Error: File not found at path '{}'.", path),
            _ => format!("Error: File or folder not found at path '{}'.", path),
        },
        FsError::NotAFile(_) => format!(
            "Error: Cannot edit a folder. Path '{}' points to a folder.",
            path
        ),
        FsError::NotAFolder(parent) => format!("Error: Path '{}' is not a folder.", parent),
        FsError::InvalidPath(reason) => format!("Error: Invalid path '{}': {}.", path, reason),
        FsError::StorageFailure(source) => format!(
            "An unexpected error occurred while {} '{}': {}",
            action.describe(),
            path,
            source
        ),
    }
}

#[async_trait]
impl AgentFileTools for CapabilityGateway {
    async fn create_node(
        &self,
        path: &str,
        node_type: NodeType,
        content: Option<String>,
    ) -> ToolOutcome {
        let action = GatedAction::Create;
        if let Err(err) = self.policy.check(action, path) {
            return self.reject(action, path, err);
        }
        let content = match node_type {
            NodeType::File => Some(content.unwrap_or_default()),
            NodeType::Folder => None,
        };
        match self.fs.create_node(path, node_type, content.as_deref()).await {
            Ok(_) => {
                info!(path, node_type = %node_type, "Agent created node");
                ToolOutcome::success(format!("Successfully created {} at {}.", node_type, path))
            }
            Err(err) => self.reject(action, path, err),
        }
    }

    async fn edit_file(&self, path: &str, content: String) -> ToolOutcome {
        let action = GatedAction::Edit;
        if let Err(err) = self.policy.check(action, path) {
            return self.reject(action, path, err);
        }
        match self.fs.save_file_content(path, &content).await {
            Ok(_) => {
                info!(path, "Agent edited file");
                ToolOutcome::success(format!("Successfully edited file at {}.", path))
            }
            Err(err) => self.reject(action, path, err),
        }
    }

    async fn duplicate_node(&self, path: &str) -> ToolOutcome {
        let action = GatedAction::Duplicate;
        if let Err(err) = self.policy.check(action, path) {
            return self.reject(action, path, err);
        }
        match self.fs.duplicate_node(path).await {
            Ok(new_path) => {
                info!(path, new_path = %new_path, "Agent duplicated node");
                ToolOutcome::success(format!(
                    "Successfully duplicated item from {} to {}.",
                    path, new_path
                ))
            }
            Err(err) => self.reject(action, path, err),
        }
    }

    async fn list_resource_files(&self) -> Result<Vec<ResourceFile>, FsError> {
        let mut files: Vec<ResourceFile> = self
            .fs
            .list_all()
            .await?
            .into_iter()
            .filter(|record| record.is_file() && self.policy.is_resource(&record.path))
            .map(|record| ResourceFile {
                content: record.content.unwrap_or_default(),
                path: record.path,
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}
