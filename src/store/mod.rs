//! NodeRecord Store
//!
//! Durable keyed storage for file system nodes. Every record is addressed by
//! its full path; the store knows nothing about hierarchy. Parent/child
//! relationships are derived by callers from path prefixes.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::types::Timestamp;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::MemoryNodeRecordStore;
pub use persistence::SledNodeRecordStore;

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Folder,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::File => "file",
            NodeType::Folder => "folder",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NodeRecord: one stored file or folder.
///
/// Serializes to the persisted record shape
/// `{ path, type, content?, size?, lastModified }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub last_modified: Timestamp,
}

impl NodeRecord {
    /// Create a file record; size is derived from the content.
    pub fn file(path: impl Into<String>, content: impl Into<String>, now: Timestamp) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            node_type: NodeType::File,
            size: content_size(&content),
            content: Some(content),
            last_modified: now,
        }
    }

    /// Create a folder record. Folders never carry content.
    pub fn folder(path: impl Into<String>, now: Timestamp) -> Self {
        Self {
            path: path.into(),
            node_type: NodeType::Folder,
            content: None,
            size: 0,
            last_modified: now,
        }
    }

    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Copy of this record at another path, stamped with `now`.
    pub fn relocated(&self, path: String, now: Timestamp) -> Self {
        Self {
            path,
            last_modified: now,
            ..self.clone()
        }
    }
}

/// Size of a content blob, counted in characters.
pub fn content_size(content: &str) -> u64 {
    content.chars().count() as u64
}

/// One write inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Insert only if the path is absent
    Add(NodeRecord),
    /// Insert or overwrite
    Put(NodeRecord),
    /// Remove if present
    Delete(String),
}

/// NodeRecord Store interface
///
/// Absence is never an error for reads or deletes. `add` is the only
/// primitive that enforces uniqueness. `run_batch` applies its operations in
/// order as a single atomic unit: either every operation becomes visible or
/// none does.
#[async_trait]
pub trait NodeRecordStore: Send + Sync {
    /// Create the backing structure if needed. Safe to call repeatedly.
    async fn init(&self) -> Result<(), StorageError>;

    async fn get_all(&self) -> Result<Vec<NodeRecord>, StorageError>;

    async fn get(&self, path: &str) -> Result<Option<NodeRecord>, StorageError>;

    async fn count(&self) -> Result<usize, StorageError>;

    /// Fails with `StorageError::DuplicatePath` if `record.path` exists.
    async fn add(&self, record: &NodeRecord) -> Result<(), StorageError>;

    async fn put(&self, record: &NodeRecord) -> Result<(), StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    async fn run_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError>;
}
