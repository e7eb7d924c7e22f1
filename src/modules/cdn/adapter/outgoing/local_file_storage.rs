use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::modules::cdn::application::domain::StorageKey;
use crate::modules::cdn::application::ports::outgoing::{FileStorage, StorageError};

/// Stores files under a root directory (`UPLOAD_DIR`), one file per key.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the public folders up front so the first upload doesn't race on them.
    pub async fn ensure_layout(&self) -> Result<(), StorageError> {
        for dir in ["images", "reviews", "videos"] {
            tokio::fs::create_dir_all(self.root.join(dir))
                .await
                .map_err(map_io)?;
        }
        Ok(())
    }

    fn path_for(&self, key: &StorageKey) -> PathBuf {
        key.segments()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

fn map_io(e: std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Io(e.to_string()),
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, key: &StorageKey, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(map_io)?;
        }
        tokio::fs::write(&path, bytes).await.map_err(map_io)
    }

    async fn locate(&self, key: &StorageKey) -> Result<PathBuf, StorageError> {
        let path = self.path_for(key);
        let meta = tokio::fs::metadata(&path).await.map_err(map_io)?;
        if !meta.is_file() {
            return Err(StorageError::NotFound);
        }
        Ok(path)
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}
