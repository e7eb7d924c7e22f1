use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::modules::cdn::application::domain::StorageKey;
use crate::modules::cdn::application::ports::outgoing::{FileStorage, StorageError};

/// Map-backed [`FileStorage`] for service tests.
#[derive(Default)]
pub struct InMemoryStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl FileStorage for InMemoryStorage {
    async fn save(&self, key: &StorageKey, bytes: &[u8]) -> Result<(), StorageError> {
        self.files
            .lock()
            .unwrap()
            .insert(key.as_str().to_string(), bytes.to_vec());
        Ok(())
    }

    /// Stored keys resolve to a relative path equal to the key.
    async fn locate(&self, key: &StorageKey) -> Result<PathBuf, StorageError> {
        if self.contains(key.as_str()) {
            Ok(PathBuf::from(key.as_str()))
        } else {
            Err(StorageError::NotFound)
        }
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.files.lock().unwrap().remove(key.as_str());
        Ok(())
    }
}
