//! In-memory comment repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::{CommentId, TaskComment, TaskId};
use crate::task::ports::{CommentRepository, EntityKind, RepositoryError, RepositoryResult};

use super::poisoned;

/// Thread-safe in-memory comment repository with task and parent indexes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    comments: HashMap<CommentId, TaskComment>,
    task_index: HashMap<TaskId, Vec<CommentId>>,
    parent_index: HashMap<CommentId, Vec<CommentId>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn unindex(state: &mut InMemoryCommentState, comment: &TaskComment) {
    if let Some(ids) = state.task_index.get_mut(&comment.task()) {
        ids.retain(|id| *id != comment.id());
        if ids.is_empty() {
            state.task_index.remove(&comment.task());
        }
    }
    if let Some(parent) = comment.parent_comment()
        && let Some(ids) = state.parent_index.get_mut(&parent)
    {
        ids.retain(|id| *id != comment.id());
        if ids.is_empty() {
            state.parent_index.remove(&parent);
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &TaskComment) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.comments.contains_key(&comment.id()) {
            return Err(RepositoryError::duplicate(
                EntityKind::Comment,
                comment.id(),
            ));
        }
        state
            .task_index
            .entry(comment.task())
            .or_default()
            .push(comment.id());
        if let Some(parent) = comment.parent_comment() {
            state.parent_index.entry(parent).or_default().push(comment.id());
        }
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> RepositoryResult<Option<TaskComment>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.comments.get(&id).cloned())
    }

    async fn find_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskComment>> {
        let state = self.state.read().map_err(poisoned)?;
        let comments = state
            .task_index
            .get(&task)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.comments.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(comments)
    }

    async fn find_by_parent_comment(
        &self,
        parent: CommentId,
    ) -> RepositoryResult<Vec<TaskComment>> {
        let state = self.state.read().map_err(poisoned)?;
        let replies = state
            .parent_index
            .get(&parent)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.comments.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(replies)
    }

    async fn delete(&self, id: CommentId) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let comment = state
            .comments
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Comment, id))?;
        unindex(&mut state, &comment);
        Ok(())
    }

    async fn delete_by_task(&self, task: TaskId) -> RepositoryResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        let ids = state.task_index.remove(&task).unwrap_or_default();
        let mut removed = 0;
        for id in ids {
            if let Some(comment) = state.comments.remove(&id) {
                state.parent_index.remove(&comment.id());
                removed += 1;
            }
        }
        Ok(removed)
    }
}
