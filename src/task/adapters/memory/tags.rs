//! In-memory tag repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::{OrganizationId, TagId, TaskTag};
use crate::task::ports::{EntityKind, RepositoryError, RepositoryResult, TagRepository};

use super::poisoned;

/// Thread-safe in-memory tag repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagRepository {
    state: Arc<RwLock<HashMap<TagId, TaskTag>>>,
}

impl InMemoryTagRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn store(&self, tag: &TaskTag) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.contains_key(&tag.id()) {
            return Err(RepositoryError::duplicate(EntityKind::Tag, tag.id()));
        }
        state.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> RepositoryResult<Option<TaskTag>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn exists(&self, id: TagId) -> RepositoryResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.contains_key(&id))
    }

    async fn find_by_organization(
        &self,
        organization: OrganizationId,
    ) -> RepositoryResult<Vec<TaskTag>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .values()
            .filter(|tag| tag.organization() == organization)
            .cloned()
            .collect())
    }
}
