//! Snapshot storage backends.
//!
//! The store persists its whole state as a single snapshot document (see
//! [`crate::snapshot`]). A [`Storage`] backend only needs to load and
//! atomically replace that one document. Two implementations are provided:
//!
//! - [`MemoryStorage`]: keeps the document in memory; for tests and
//!   ephemeral servers
//! - [`FileStorage`]: writes `trailmap.json` under a base directory with a
//!   temp-file-and-rename replace

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{ApiError, Result};

/// File name of the snapshot document under a [`FileStorage`] base directory.
pub const SNAPSHOT_FILE: &str = "trailmap.json";

/// Snapshot document storage.
#[async_trait]
pub trait Storage: Debug + Send + Sync {
    /// Read the snapshot document. `None` when no snapshot has been written.
    async fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the snapshot document. Replacement is atomic: a concurrent
    /// load sees either the previous or the new document, never a mix.
    async fn save(&self, bytes: &[u8]) -> Result<()>;
}

/// In-memory snapshot storage.
///
/// Stores the document behind `Arc<RwLock<...>>` so cloned handles share
/// state. Useful for unit tests and in-memory servers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().expect("RwLock poisoned").clone())
    }

    async fn save(&self, bytes: &[u8]) -> Result<()> {
        *self.data.write().expect("RwLock poisoned") = Some(bytes.to_vec());
        Ok(())
    }
}

/// File-based snapshot storage.
///
/// The snapshot lives at `<base>/trailmap.json`. Saves write to a `.tmp`
/// sibling first and rename it into place, so a crash mid-write never leaves
/// a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Base directory for this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base_path.join(SNAPSHOT_FILE)
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        let path = self.snapshot_path();
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::io(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn save(&self, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await.map_err(|e| {
            ApiError::io(format!(
                "failed to create directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let path = self.snapshot_path();
        let tmp = self.base_path.join(format!("{}.tmp", SNAPSHOT_FILE));

        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            ApiError::io(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            ApiError::io(format!(
                "failed to rename {} to {}: {}",
                tmp.display(),
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_none());

        storage.save(b"hello").await.unwrap();
        assert_eq!(storage.load().await.unwrap().unwrap(), b"hello");

        storage.save(b"world").await.unwrap();
        assert_eq!(storage.load().await.unwrap().unwrap(), b"world");
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        storage.save(b"shared").await.unwrap();
        assert_eq!(clone.load().await.unwrap().unwrap(), b"shared");
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.load().await.unwrap().is_none());

        storage.save(b"{\"version\":1}").await.unwrap();
        assert_eq!(storage.load().await.unwrap().unwrap(), b"{\"version\":1}");

        // Replacements leave no temp file behind
        storage.save(b"{\"version\":2}").await.unwrap();
        assert!(!dir.path().join(format!("{}.tmp", SNAPSHOT_FILE)).exists());
        assert_eq!(storage.load().await.unwrap().unwrap(), b"{\"version\":2}");
    }

    #[tokio::test]
    async fn test_file_storage_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("trailmap");
        let storage = FileStorage::new(&nested);

        storage.save(b"x").await.unwrap();
        assert!(nested.join(SNAPSHOT_FILE).exists());
    }
}
