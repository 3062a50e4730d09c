//! File-store port for attachment bytes.

use crate::task::domain::StoragePath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for file-store operations.
pub type FileStoreResult<T> = Result<T, FileStoreError>;

/// Errors returned by file-store implementations.
#[derive(Debug, Clone, Error)]
pub enum FileStoreError {
    /// No bytes exist at the given path.
    #[error("no stored file at {0}")]
    NotFound(StoragePath),

    /// Storage-layer failure.
    #[error("file store error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl FileStoreError {
    /// Wraps a storage-layer error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Attachment byte storage contract.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores bytes and returns their opaque location.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> FileStoreResult<StoragePath>;

    /// Removes the bytes at the given location.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::NotFound`] when nothing is stored there.
    async fn delete(&self, path: &StoragePath) -> FileStoreResult<()>;
}
