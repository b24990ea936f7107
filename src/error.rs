//! Error types for the pkgfs file system.

use thiserror::Error;

/// Errors raised by a node record store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("A node already exists at path: {0}")]
    DuplicatePath(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Typed outcomes of file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("No file or folder at path: {0}")]
    NotFound(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Not a folder: {0}")]
    NotAFolder(String),

    #[error("A file or folder already exists at path: {0}")]
    DuplicatePath(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Storage failure: {0}")]
    StorageFailure(StorageError),
}

impl From<StorageError> for FsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicatePath(path) => FsError::DuplicatePath(path),
            other => FsError::StorageFailure(other),
        }
    }
}

/// Application-level errors (CLI, configuration, logging).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Fs(FsError::from(err))
    }
}
