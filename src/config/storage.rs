//! StorageConfig: which node store backend to open and where.

use crate::config::paths::xdg_root;
use crate::error::ApiError;
use crate::store::{MemoryNodeRecordStore, NodeRecordStore, SledNodeRecordStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Node store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; contents are lost on exit
    Memory,
    #[default]
    Sled,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory of the sled database; None means the XDG data default
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the sled directory.
    pub fn resolve_path(&self) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => xdg_root::default_store_dir(),
        }
    }

    /// Open the configured store.
    pub fn open(&self) -> Result<Arc<dyn NodeRecordStore>, ApiError> {
        match self.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryNodeRecordStore::new())),
            StorageBackend::Sled => {
                let path = self.resolve_path()?;
                tracing::debug!(path = %path.display(), "Opening sled node store");
                Ok(Arc::new(SledNodeRecordStore::new(&path)?))
            }
        }
    }
}
