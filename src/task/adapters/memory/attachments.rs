//! In-memory attachment-record repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::{AttachmentId, TaskAttachment, TaskId};
use crate::task::ports::{
    AttachmentRepository, EntityKind, RepositoryError, RepositoryResult,
};

use super::poisoned;

/// Thread-safe in-memory attachment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    state: Arc<RwLock<HashMap<AttachmentId, TaskAttachment>>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn store(&self, attachment: &TaskAttachment) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.contains_key(&attachment.id()) {
            return Err(RepositoryError::duplicate(
                EntityKind::Attachment,
                attachment.id(),
            ));
        }
        state.insert(attachment.id(), attachment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AttachmentId) -> RepositoryResult<Option<TaskAttachment>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskAttachment>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .values()
            .filter(|attachment| attachment.task() == task)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: AttachmentId) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Attachment, id))
    }

    async fn delete_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskAttachment>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let doomed: Vec<AttachmentId> = state
            .values()
            .filter(|attachment| attachment.task() == task)
            .map(TaskAttachment::id)
            .collect();
        let mut removed = Vec::with_capacity(doomed.len());
        for id in doomed {
            if let Some(attachment) = state.remove(&id) {
                removed.push(attachment);
            }
        }
        Ok(removed)
    }
}
