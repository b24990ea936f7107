//! FileSystem: tree-consistent operations over the flat node store.
//!
//! Every multi-record mutation is computed from a single snapshot of the
//! store and committed as one batch. The write lock serializes those
//! snapshot-then-commit sequences, so a shared `Arc<FileSystem>` keeps the
//! single-writer model even when called from several tasks.

use super::export::{self, ExportEntry};
use super::naming;
use super::seed::{self, RESOURCES_DIR};
use crate::error::FsError;
use crate::store::{BatchOp, NodeRecord, NodeRecordStore, NodeType};
use crate::tree::{self, path, TreeNode};
use crate::types::{Clock, SystemClock};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct FileSystem {
    store: Arc<dyn NodeRecordStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl FileSystem {
    /// Create a file system over an injected store, stamped by the wall clock.
    pub fn new(store: Arc<dyn NodeRecordStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn NodeRecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Ensure the backing store exists and seed it when empty.
    ///
    /// Returns `true` when the seed was written. Safe to call on every start.
    pub async fn initialize(&self) -> Result<bool, FsError> {
        self.store.init().await?;
        let _guard = self.write_lock.lock().await;
        if self.store.count().await? > 0 {
            debug!("Store already populated, skipping seed");
            return Ok(false);
        }
        let ops = seed::seed_records(self.clock.now_millis())
            .into_iter()
            .map(BatchOp::Add)
            .collect();
        self.store.run_batch(ops).await?;
        info!("Seeded initial file system layout");
        Ok(true)
    }

    /// Remove every node and re-seed, as one batch.
    pub async fn reset(&self) -> Result<(), FsError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.store.get_all().await?;
        let removed = existing.len();
        let mut ops: Vec<BatchOp> = existing
            .into_iter()
            .map(|record| BatchOp::Delete(record.path))
            .collect();
        ops.extend(
            seed::seed_records(self.clock.now_millis())
                .into_iter()
                .map(BatchOp::Add),
        );
        self.store.run_batch(ops).await?;
        info!(removed, "File system reset to initial layout");
        Ok(())
    }

    pub async fn get_node(&self, path: &str) -> Result<Option<NodeRecord>, FsError> {
        Ok(self.store.get(path).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<NodeRecord>, FsError> {
        Ok(self.store.get_all().await?)
    }

    /// Build the presentation tree from a fresh read of the store.
    pub async fn tree(&self) -> Result<Vec<TreeNode>, FsError> {
        let records = self.store.get_all().await?;
        Ok(tree::build_tree(&records))
    }

    /// Content of the file at `path`.
    pub async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let record = self.require(path).await?;
        if !record.is_file() {
            return Err(FsError::NotAFile(path.to_string()));
        }
        Ok(record.content.unwrap_or_default())
    }

    /// Create a file or folder. Folders ignore `content`.
    ///
    /// Uniqueness is enforced by the store's add-if-absent primitive.
    pub async fn create_node(
        &self,
        path: &str,
        node_type: NodeType,
        content: Option<&str>,
    ) -> Result<NodeRecord, FsError> {
        path::validate_path(path)?;
        let now = self.clock.now_millis();
        let record = match node_type {
            NodeType::File => NodeRecord::file(path, content.unwrap_or_default(), now),
            NodeType::Folder => NodeRecord::folder(path, now),
        };
        let _guard = self.write_lock.lock().await;
        self.store.add(&record).await?;
        info!(path, node_type = %node_type, size = record.size, "Created node");
        Ok(record)
    }

    /// Overwrite a file's content, recomputing size and stamp.
    pub async fn save_file_content(&self, path: &str, content: &str) -> Result<NodeRecord, FsError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.require(path).await?;
        if !existing.is_file() {
            return Err(FsError::NotAFile(path.to_string()));
        }
        let record = NodeRecord::file(path, content, self.clock.now_millis());
        self.store.put(&record).await?;
        info!(path, size = record.size, "Saved file content");
        Ok(record)
    }

    /// Delete a node and everything beneath it.
    ///
    /// Returns the number of records removed. Deleting an absent path is a no-op.
    pub async fn delete_node(&self, path: &str) -> Result<usize, FsError> {
        let _guard = self.write_lock.lock().await;
        let closure = self.closure(path).await?;
        let removed = closure.len();
        let mut ops: Vec<BatchOp> = closure
            .into_iter()
            .map(|record| BatchOp::Delete(record.path))
            .collect();
        if removed == 0 {
            ops.push(BatchOp::Delete(path.to_string()));
        }
        self.store.run_batch(ops).await?;
        info!(path, removed, "Deleted node");
        Ok(removed)
    }

    /// Rename a node in place, carrying its whole sub-tree along.
    ///
    /// Returns the new path. Renaming to the current name is a no-op.
    pub async fn rename_node(&self, old_path: &str, new_name: &str) -> Result<String, FsError> {
        path::validate_name(new_name)?;
        let new_path = path::join(path::parent_of(old_path), new_name);
        if new_path == old_path {
            return Ok(new_path);
        }

        let _guard = self.write_lock.lock().await;
        self.require(old_path).await?;
        if self.store.get(&new_path).await?.is_some() {
            return Err(FsError::DuplicatePath(new_path));
        }

        let now = self.clock.now_millis();
        let closure = self.closure(old_path).await?;
        let moved = closure.len();
        let mut ops = Vec::with_capacity(moved * 2);
        let mut additions = Vec::with_capacity(moved);
        for record in closure {
            if let Some(target) = path::rebase(&record.path, old_path, &new_path) {
                additions.push(BatchOp::Add(record.relocated(target, now)));
            }
            ops.push(BatchOp::Delete(record.path));
        }
        ops.extend(additions);
        self.store.run_batch(ops).await?;
        info!(old_path, new_path = %new_path, moved, "Renamed node");
        Ok(new_path)
    }

    /// Copy a node and its sub-tree to a fresh sibling path.
    ///
    /// Returns the path of the copy.
    pub async fn duplicate_node(&self, path: &str) -> Result<String, FsError> {
        let _guard = self.write_lock.lock().await;
        self.require(path).await?;

        let snapshot = self.store.get_all().await?;
        let existing: HashSet<String> = snapshot.iter().map(|r| r.path.clone()).collect();
        let new_path = path::unique_sibling(path, &existing);

        let now = self.clock.now_millis();
        let ops: Vec<BatchOp> = snapshot
            .iter()
            .filter_map(|record| {
                path::rebase(&record.path, path, &new_path)
                    .map(|target| BatchOp::Add(record.relocated(target, now)))
            })
            .collect();
        let copied = ops.len();
        self.store.run_batch(ops).await?;
        info!(path, new_path = %new_path, copied, "Duplicated node");
        Ok(new_path)
    }

    /// Create an empty `Untitled.R` (or `Untitled-N.R`) under `parent`.
    pub async fn create_untitled_file(&self, parent: &str) -> Result<String, FsError> {
        self.create_untitled(parent, NodeType::File).await
    }

    /// Create a `NewFolder` (or `NewFolder-N`) under `parent`.
    pub async fn create_untitled_folder(&self, parent: &str) -> Result<String, FsError> {
        self.create_untitled(parent, NodeType::Folder).await
    }

    async fn create_untitled(&self, parent: &str, node_type: NodeType) -> Result<String, FsError> {
        let _guard = self.write_lock.lock().await;
        if parent != path::ROOT {
            let parent_record = self.require(parent).await?;
            if !parent_record.is_folder() {
                return Err(FsError::NotAFolder(parent.to_string()));
            }
        }
        let existing: HashSet<String> = self
            .store
            .get_all()
            .await?
            .into_iter()
            .map(|r| r.path)
            .collect();
        let new_path = naming::next_untitled_path(parent, node_type, &existing);
        let now = self.clock.now_millis();
        let record = match node_type {
            NodeType::File => NodeRecord::file(new_path.clone(), "", now),
            NodeType::Folder => NodeRecord::folder(new_path.clone(), now),
        };
        self.store.add(&record).await?;
        info!(path = %new_path, node_type = %node_type, "Created untitled node");
        Ok(new_path)
    }

    /// Store an uploaded file under the resources folder.
    pub async fn upload_resource(&self, file_name: &str, content: &str) -> Result<NodeRecord, FsError> {
        path::validate_name(file_name)?;
        let target = path::join(RESOURCES_DIR, file_name);
        self.create_node(&target, NodeType::File, Some(content)).await
    }

    /// Walkable manifest of the whole store for packaging.
    pub async fn export_entries(&self) -> Result<Vec<ExportEntry>, FsError> {
        let records = self.store.get_all().await?;
        Ok(export::export_entries(&records))
    }

    async fn require(&self, path: &str) -> Result<NodeRecord, FsError> {
        self.store
            .get(path)
            .await?
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    /// The node at `path` plus every node beneath it, from one snapshot.
    async fn closure(&self, path: &str) -> Result<Vec<NodeRecord>, FsError> {
        let closure: Vec<NodeRecord> = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|record| path::is_descendant_or_self(&record.path, path))
            .collect();
        debug!(path, members = closure.len(), "Computed closure");
        Ok(closure)
    }
}
