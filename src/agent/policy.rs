//! Path policy for automated callers.

use crate::error::FsError;
use crate::tree::path;
use crate::vfs::{PACKAGE_DIR, RESOURCES_DIR};
use serde::{Deserialize, Deserializer, Serialize};

/// Mutations an agent may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    Create,
    Edit,
    Duplicate,
}

impl GatedAction {
    fn denial(&self, prefix: &str) -> String {
        match self {
            GatedAction::Create => format!(
                "Error: I can only create files or folders inside the {} directory.",
                prefix
            ),
            GatedAction::Edit => format!("Error: I can only edit files inside the {} directory.", prefix),
            GatedAction::Duplicate => format!(
                "Error: I can only duplicate items inside the {} directory.",
                prefix
            ),
        }
    }

    /// Gerund phrase used in unexpected-failure messages.
    pub fn describe(&self) -> &'static str {
        match self {
            GatedAction::Create => "creating",
            GatedAction::Edit => "editing",
            GatedAction::Duplicate => "duplicating",
        }
    }
}

/// Writable and readable sub-trees for agent access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPolicy {
    /// Mutations are allowed strictly beneath this prefix
    #[serde(default = "default_writable_prefix", deserialize_with = "deserialize_prefix")]
    pub writable_prefix: String,
    /// Files beneath this prefix are offered as read-only context
    #[serde(default = "default_resource_prefix", deserialize_with = "deserialize_prefix")]
    pub resource_prefix: String,
}

fn default_writable_prefix() -> String {
    PACKAGE_DIR.to_string()
}

fn default_resource_prefix() -> String {
    RESOURCES_DIR.to_string()
}

/// Prefixes are compared without a trailing `/`.
fn trim_prefix(prefix: &str) -> &str {
    prefix.trim_end_matches('/')
}

fn deserialize_prefix<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(trim_prefix(&raw).to_string())
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self {
            writable_prefix: default_writable_prefix(),
            resource_prefix: default_resource_prefix(),
        }
    }
}

impl PathPolicy {
    /// True when `candidate` lies strictly beneath `prefix`.
    fn is_strictly_under(candidate: &str, prefix: &str) -> bool {
        let prefix = trim_prefix(prefix);
        candidate != prefix && path::is_descendant_or_self(candidate, prefix)
    }

    pub fn is_writable(&self, candidate: &str) -> bool {
        Self::is_strictly_under(candidate, &self.writable_prefix)
    }

    pub fn is_resource(&self, candidate: &str) -> bool {
        Self::is_strictly_under(candidate, &self.resource_prefix)
    }

    /// Reject `action` on `candidate` unless it is inside the writable sub-tree.
    pub fn check(&self, action: GatedAction, candidate: &str) -> Result<(), FsError> {
        if self.is_writable(candidate) {
            Ok(())
        } else {
            Err(FsError::PolicyViolation(action.denial(trim_prefix(&self.writable_prefix))))
        }
    }
}
