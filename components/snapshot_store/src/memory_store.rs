//! In-process snapshot store

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use toolbar_types::{Result, ToolbarError};

use crate::{SnapshotId, SnapshotStore};

/// Snapshot store backed by a concurrent map
///
/// Useful for tests and for hosts that serve the toolbar from the same
/// process that profiled the request.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<DashMap<SnapshotId, Arc<Vec<u8>>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn save(&self, id: &SnapshotId, body: &[u8]) -> Result<()> {
        self.entries.insert(id.clone(), Arc::new(body.to_vec()));
        Ok(())
    }

    async fn load(&self, id: &SnapshotId) -> Result<Vec<u8>> {
        self.entries
            .get(id)
            .map(|entry| entry.value().as_ref().clone())
            .ok_or_else(|| ToolbarError::SnapshotNotFound(id.file_name()))
    }

    async fn exists(&self, id: &SnapshotId) -> Result<bool> {
        Ok(self.entries.contains_key(id))
    }

    async fn delete(&self, id: &SnapshotId) -> Result<bool> {
        Ok(self.entries.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let store = MemorySnapshotStore::new();
        let id = SnapshotId::new("1");
        store.save(&id, b"body").await.unwrap();
        assert_eq!(store.load(&id).await.unwrap(), b"body".to_vec());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing() {
        let store = MemorySnapshotStore::new();
        let err = store.load(&SnapshotId::new("2")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("debugbar_2"));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemorySnapshotStore::new();
        let other = store.clone();
        store.save(&SnapshotId::new("3"), b"x").await.unwrap();
        assert!(other.exists(&SnapshotId::new("3")).await.unwrap());
        assert!(other.delete(&SnapshotId::new("3")).await.unwrap());
        assert!(store.is_empty());
    }
}
