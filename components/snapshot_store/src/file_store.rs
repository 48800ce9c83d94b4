//! Directory-backed snapshot store

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toolbar_types::{Result, ToolbarError};
use tracing::{debug, warn};

use crate::{SnapshotId, SnapshotStore};

/// Stores each snapshot as one file named by [`SnapshotId::file_name`]
///
/// Bodies are written to a uniquely named temporary file in the same
/// directory and renamed into place, so readers never observe a partial
/// write and concurrent writers never share a temporary file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file holding `id`
    pub fn path_for(&self, id: &SnapshotId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    fn temp_path_for(&self, id: &SnapshotId) -> PathBuf {
        self.dir
            .join(format!(".{}.{}.tmp", id.file_name(), uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, id: &SnapshotId, body: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(id);
        let tmp = self.temp_path_for(id);

        tokio::fs::write(&tmp, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            warn!("Failed to move snapshot into place at {}: {}", path.display(), e);
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!("Saved snapshot {} ({} bytes)", path.display(), body.len());
        Ok(())
    }

    async fn load(&self, id: &SnapshotId) -> Result<Vec<u8>> {
        match tokio::fs::read(self.path_for(id)).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ToolbarError::SnapshotNotFound(id.file_name()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, id: &SnapshotId) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_for(id)).await?)
    }

    async fn delete(&self, id: &SnapshotId) -> Result<bool> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
