use async_trait::async_trait;
use std::path::PathBuf;

use crate::modules::cdn::application::domain::StorageKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("File not found")]
    NotFound,

    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Blob storage addressed by [`StorageKey`].
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn save(&self, key: &StorageKey, bytes: &[u8]) -> Result<(), StorageError>;

    /// Location of an existing file, handed to the HTTP layer for streaming.
    async fn locate(&self, key: &StorageKey) -> Result<PathBuf, StorageError>;

    /// Removing a missing file is not an error.
    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError>;
}
