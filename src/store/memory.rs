//! In-memory NodeRecord store.
//!
//! Records live in a `BTreeMap` behind a `parking_lot::RwLock`. Batches are
//! applied to a staged copy which replaces the live map only when every
//! operation succeeded.

use super::{BatchOp, NodeRecord, NodeRecordStore};
use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryNodeRecordStore {
    records: RwLock<BTreeMap<String, NodeRecord>>,
}

impl MemoryNodeRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply(records: &mut BTreeMap<String, NodeRecord>, op: BatchOp) -> Result<(), StorageError> {
    match op {
        BatchOp::Add(record) => {
            if records.contains_key(&record.path) {
                return Err(StorageError::DuplicatePath(record.path));
            }
            records.insert(record.path.clone(), record);
        }
        BatchOp::Put(record) => {
            records.insert(record.path.clone(), record);
        }
        BatchOp::Delete(path) => {
            records.remove(&path);
        }
    }
    Ok(())
}

#[async_trait]
impl NodeRecordStore for MemoryNodeRecordStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<NodeRecord>, StorageError> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn get(&self, path: &str) -> Result<Option<NodeRecord>, StorageError> {
        Ok(self.records.read().get(path).cloned())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.records.read().len())
    }

    async fn add(&self, record: &NodeRecord) -> Result<(), StorageError> {
        apply(&mut self.records.write(), BatchOp::Add(record.clone()))
    }

    async fn put(&self, record: &NodeRecord) -> Result<(), StorageError> {
        apply(&mut self.records.write(), BatchOp::Put(record.clone()))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        apply(&mut self.records.write(), BatchOp::Delete(path.to_string()))
    }

    async fn run_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let mut records = self.records.write();
        let mut staged = records.clone();
        for op in ops {
            apply(&mut staged, op)?;
        }
        *records = staged;
        Ok(())
    }
}
