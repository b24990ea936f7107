use pkgfs::store::{MemoryNodeRecordStore, NodeRecord, NodeRecordStore, SledNodeRecordStore};
use pkgfs::types::{Clock, FixedClock, Timestamp};
use pkgfs::vfs::FileSystem;
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub const NOW: i64 = 1_700_000_000_000;

/// Clock that advances by one millisecond on every read.
pub struct TickingClock(AtomicI64);

impl TickingClock {
    pub fn starting_at(start: Timestamp) -> Self {
        Self(AtomicI64::new(start))
    }
}

impl Clock for TickingClock {
    fn now_millis(&self) -> Timestamp {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Seeded file system over an in-memory store.
pub async fn memory_fs() -> Arc<FileSystem> {
    let store: Arc<dyn NodeRecordStore> = Arc::new(MemoryNodeRecordStore::new());
    seeded(store, Arc::new(FixedClock(NOW))).await
}

/// Seeded file system over a sled store inside `dir`.
pub async fn sled_fs(dir: &TempDir) -> Arc<FileSystem> {
    seeded(sled_store(dir), Arc::new(FixedClock(NOW))).await
}

fn sled_store(dir: &TempDir) -> Arc<dyn NodeRecordStore> {
    Arc::new(SledNodeRecordStore::new(&dir.path().join("store")).unwrap())
}

async fn seeded(store: Arc<dyn NodeRecordStore>, clock: Arc<dyn Clock>) -> Arc<FileSystem> {
    let fs = Arc::new(FileSystem::with_clock(store, clock));
    assert!(fs.initialize().await.unwrap());
    fs
}

/// Run the same scenario against every backend.
pub async fn with_backends<F, Fut>(scenario: F)
where
    F: Fn(Arc<FileSystem>) -> Fut,
    Fut: Future<Output = ()>,
{
    scenario(memory_fs().await).await;

    let dir = TempDir::new().unwrap();
    scenario(sled_fs(&dir).await).await;
}

/// Like `with_backends`, but every file system reads a `TickingClock`.
pub async fn with_ticking_backends<F, Fut>(scenario: F)
where
    F: Fn(Arc<FileSystem>) -> Fut,
    Fut: Future<Output = ()>,
{
    let memory: Arc<dyn NodeRecordStore> = Arc::new(MemoryNodeRecordStore::new());
    scenario(seeded(memory, Arc::new(TickingClock::starting_at(NOW))).await).await;

    let dir = TempDir::new().unwrap();
    scenario(seeded(sled_store(&dir), Arc::new(TickingClock::starting_at(NOW))).await).await;
}

pub async fn paths(fs: &FileSystem) -> Vec<String> {
    snapshot(fs).await.into_iter().map(|r| r.path).collect()
}

/// Every record, sorted by path.
pub async fn snapshot(fs: &FileSystem) -> Vec<NodeRecord> {
    let mut records = fs.list_all().await.unwrap();
    records.sort_by(|a, b| a.path.cmp(&b.path));
    records
}
