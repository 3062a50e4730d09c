//! In-memory file store for attachment bytes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::domain::StoragePath;
use crate::task::ports::files::{FileStore, FileStoreError, FileStoreResult};

fn poisoned(err: impl std::fmt::Display) -> FileStoreError {
    FileStoreError::storage(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory file store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStore {
    state: Arc<RwLock<HashMap<StoragePath, Vec<u8>>>>,
}

impl InMemoryFileStore {
    /// Creates an empty file store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes at a path, if present.
    #[must_use]
    pub fn bytes_at(&self, path: &StoragePath) -> Option<Vec<u8>> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.get(path).cloned())
    }

    /// Returns the number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().map_or(0, |state| state.len())
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> FileStoreResult<StoragePath> {
        let mut state = self.state.write().map_err(poisoned)?;
        let path = StoragePath::new(format!("mem://{}/{file_name}", Uuid::new_v4()));
        state.insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    async fn delete(&self, path: &StoragePath) -> FileStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FileStoreError::NotFound(path.clone()))
    }
}
