//! Repository port for threaded task comments.

use super::repository::RepositoryResult;
use crate::task::domain::{CommentId, TaskComment, TaskId};
use async_trait::async_trait;

/// Comment persistence contract.
///
/// Comments are stored flat; thread reconstruction and cascade deletion are
/// service concerns built on the parent-indexed lookups below.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the comment id
    /// already exists.
    async fn store(&self, comment: &TaskComment) -> RepositoryResult<()>;

    /// Finds a comment by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: CommentId) -> RepositoryResult<Option<TaskComment>>;

    /// Returns every comment on the given task, replies included.
    async fn find_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskComment>>;

    /// Returns the direct replies to the given comment.
    async fn find_by_parent_comment(
        &self,
        parent: CommentId,
    ) -> RepositoryResult<Vec<TaskComment>>;

    /// Removes a single comment record.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the comment does
    /// not exist.
    async fn delete(&self, id: CommentId) -> RepositoryResult<()>;

    /// Removes every comment on the given task. Returns the removed count.
    async fn delete_by_task(&self, task: TaskId) -> RepositoryResult<usize>;
}
