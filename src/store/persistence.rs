//! Sled-backed NodeRecord store.
//!
//! Records are kept in a single sled tree keyed by path, each value being the
//! JSON encoding of the record. Batches run inside a sled transaction.

use super::{BatchOp, NodeRecord, NodeRecordStore};
use crate::error::StorageError;
use async_trait::async_trait;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::path::Path;
use tracing::debug;

/// Name of the sled tree holding file system records
pub const FILES_TREE: &str = "files";

pub struct SledNodeRecordStore {
    db: sled::Db,
    tree: sled::Tree,
}

/// A batch operation with its record already encoded.
enum EncodedOp {
    Add(String, Vec<u8>),
    Put(String, Vec<u8>),
    Delete(String),
}

impl SledNodeRecordStore {
    /// Open (or create) a store at the given directory.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Wrap an already opened sled database.
    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(FILES_TREE)?;
        Ok(Self { db, tree })
    }

    fn encode(record: &NodeRecord) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec(record)?)
    }

    fn decode(bytes: &[u8]) -> Result<NodeRecord, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    async fn flush(&self) -> Result<(), StorageError> {
        self.tree.flush_async().await?;
        Ok(())
    }
}

#[async_trait]
impl NodeRecordStore for SledNodeRecordStore {
    async fn init(&self) -> Result<(), StorageError> {
        // open_tree is idempotent; it only creates the tree the first time.
        self.db.open_tree(FILES_TREE)?;
        debug!(tree = FILES_TREE, "Node store initialized");
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<NodeRecord>, StorageError> {
        let mut records = Vec::new();
        for item in self.tree.iter() {
            let (_, value) = item?;
            records.push(Self::decode(&value)?);
        }
        Ok(records)
    }

    async fn get(&self, path: &str) -> Result<Option<NodeRecord>, StorageError> {
        match self.tree.get(path.as_bytes())? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.tree.len())
    }

    async fn add(&self, record: &NodeRecord) -> Result<(), StorageError> {
        let value = Self::encode(record)?;
        let swapped = self.tree.compare_and_swap(
            record.path.as_bytes(),
            None as Option<&[u8]>,
            Some(value),
        )?;
        if swapped.is_err() {
            return Err(StorageError::DuplicatePath(record.path.clone()));
        }
        self.flush().await
    }

    async fn put(&self, record: &NodeRecord) -> Result<(), StorageError> {
        self.tree.insert(record.path.as_bytes(), Self::encode(record)?)?;
        self.flush().await
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.tree.remove(path.as_bytes())?;
        self.flush().await
    }

    async fn run_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let encoded = ops
            .iter()
            .map(|op| {
                Ok(match op {
                    BatchOp::Add(record) => EncodedOp::Add(record.path.clone(), Self::encode(record)?),
                    BatchOp::Put(record) => EncodedOp::Put(record.path.clone(), Self::encode(record)?),
                    BatchOp::Delete(path) => EncodedOp::Delete(path.clone()),
                })
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        let result: Result<(), TransactionError<StorageError>> = self.tree.transaction(|tx| {
            for op in &encoded {
                match op {
                    EncodedOp::Add(path, value) => {
                        if tx.get(path.as_bytes())?.is_some() {
                            return Err(ConflictableTransactionError::Abort(
                                StorageError::DuplicatePath(path.clone()),
                            ));
                        }
                        tx.insert(path.as_bytes(), value.as_slice())?;
                    }
                    EncodedOp::Put(path, value) => {
                        tx.insert(path.as_bytes(), value.as_slice())?;
                    }
                    EncodedOp::Delete(path) => {
                        tx.remove(path.as_bytes())?;
                    }
                }
            }
            Ok(())
        });

        match result {
            Ok(()) => {
                debug!(operations = encoded.len(), "Batch committed");
                self.flush().await
            }
            Err(TransactionError::Abort(err)) => Err(err),
            Err(TransactionError::Storage(err)) => Err(err.into()),
        }
    }
}
