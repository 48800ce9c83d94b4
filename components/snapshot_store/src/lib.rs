//! Snapshot persistence
//!
//! Snapshots are stored as opaque bytes under an id derived from the
//! profiled request's start time. Stores never interpret the payload.
//!
//! # Example
//!
//! ```
//! use snapshot_store::{MemorySnapshotStore, SnapshotId, SnapshotStore};
//!
//! # tokio_test::block_on(async {
//! let store = MemorySnapshotStore::new();
//! let id = SnapshotId::new("1700000000123456");
//! store.save(&id, b"{}").await.unwrap();
//! assert_eq!(store.load(&id).await.unwrap(), b"{}".to_vec());
//! # });
//! ```

mod file_store;
mod memory_store;
mod sanitize;

pub use file_store::FileSnapshotStore;
pub use memory_store::MemorySnapshotStore;
pub use sanitize::sanitize_filename;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use toolbar_types::Result;

/// Prefix of every stored snapshot's file name
pub const FILE_PREFIX: &str = "debugbar_";

/// Opaque, filesystem-safe snapshot id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Id from a caller-supplied token; unsafe characters are removed
    pub fn new(token: &str) -> Self {
        Self(sanitize_filename(token))
    }

    /// Id for a request that started at `start_time` (seconds since epoch)
    ///
    /// The token is the start time in whole microseconds.
    pub fn from_start_time(start_time: f64) -> Self {
        let micros = (start_time * 1_000_000.0).round().max(0.0) as u64;
        Self(micros.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name under which the snapshot is stored, e.g. `debugbar_1700000000123456`
    pub fn file_name(&self) -> String {
        format!("{}{}", FILE_PREFIX, self.0)
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot as written by the end of a profiled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshotRef {
    pub id: SnapshotId,
    pub body: Vec<u8>,
}

/// Byte-oriented snapshot persistence
///
/// Writes under one id never affect another id. Concurrent writes under the
/// same id are last-write-wins, and a load sees the latest completed write.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Store `body` under `id`, replacing any previous body
    async fn save(&self, id: &SnapshotId, body: &[u8]) -> Result<()>;

    /// Fetch the body stored under `id`
    ///
    /// Returns [`ToolbarError::SnapshotNotFound`](toolbar_types::ToolbarError::SnapshotNotFound)
    /// carrying the id's file name when nothing is stored.
    async fn load(&self, id: &SnapshotId) -> Result<Vec<u8>>;

    /// [`load`](SnapshotStore::load), keeping the id with the body
    async fn fetch(&self, id: &SnapshotId) -> Result<StoredSnapshotRef> {
        let body = self.load(id).await?;
        Ok(StoredSnapshotRef {
            id: id.clone(),
            body,
        })
    }

    async fn exists(&self, id: &SnapshotId) -> Result<bool>;

    /// Remove the body stored under `id`; returns whether one existed
    async fn delete(&self, id: &SnapshotId) -> Result<bool>;
}
