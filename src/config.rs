//! Configuration
//!
//! Layered configuration built with the `config` crate: built-in defaults, the
//! global config file, an optional explicit file and `PKGFS__*` environment
//! variables, in increasing order of precedence.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage;

use crate::agent::PathPolicy;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub use facade::ConfigLoader;
pub use storage::{StorageBackend, StorageConfig};

/// Top-level pkgfs configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PkgfsConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    /// Agent path policy
    #[serde(default)]
    pub policy: PathPolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}
