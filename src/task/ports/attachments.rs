//! Repository port for task attachment records.

use super::repository::RepositoryResult;
use crate::task::domain::{AttachmentId, TaskAttachment, TaskId};
use async_trait::async_trait;

/// Attachment-record persistence contract. Bytes live behind the file-store
/// port; this contract covers the metadata records only.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores a new attachment record.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the attachment id
    /// already exists.
    async fn store(&self, attachment: &TaskAttachment) -> RepositoryResult<()>;

    /// Finds an attachment by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: AttachmentId) -> RepositoryResult<Option<TaskAttachment>>;

    /// Returns every attachment on the given task.
    async fn find_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskAttachment>>;

    /// Removes a single attachment record.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the record does
    /// not exist.
    async fn delete(&self, id: AttachmentId) -> RepositoryResult<()>;

    /// Removes every attachment record on the given task, returning the
    /// removed records so callers can clean up stored bytes.
    async fn delete_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskAttachment>>;
}
