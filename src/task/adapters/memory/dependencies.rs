//! In-memory dependency-edge repository.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::domain::{DependencyId, TaskDependency, TaskId};
use crate::task::ports::{DependencyRepository, EntityKind, RepositoryError, RepositoryResult};

use super::poisoned;

/// Thread-safe in-memory dependency repository with an ordered-pair index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDependencyRepository {
    state: Arc<RwLock<InMemoryDependencyState>>,
}

#[derive(Debug, Default)]
struct InMemoryDependencyState {
    edges: HashMap<DependencyId, TaskDependency>,
    pairs: HashSet<(TaskId, TaskId)>,
}

impl InMemoryDependencyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DependencyRepository for InMemoryDependencyRepository {
    async fn store(&self, edge: &TaskDependency) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.edges.contains_key(&edge.id()) {
            return Err(RepositoryError::duplicate(EntityKind::Dependency, edge.id()));
        }
        state.pairs.insert((edge.task(), edge.depends_on()));
        state.edges.insert(edge.id(), edge.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DependencyId) -> RepositoryResult<Option<TaskDependency>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.edges.get(&id).cloned())
    }

    async fn exists_edge(&self, task: TaskId, depends_on: TaskId) -> RepositoryResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.pairs.contains(&(task, depends_on)))
    }

    async fn find_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskDependency>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .edges
            .values()
            .filter(|edge| edge.task() == task)
            .cloned()
            .collect())
    }

    async fn find_by_depends_on(
        &self,
        depends_on: TaskId,
    ) -> RepositoryResult<Vec<TaskDependency>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .edges
            .values()
            .filter(|edge| edge.depends_on() == depends_on)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: DependencyId) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let edge = state
            .edges
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Dependency, id))?;
        state.pairs.remove(&(edge.task(), edge.depends_on()));
        Ok(())
    }

    async fn delete_touching(&self, task: TaskId) -> RepositoryResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        let doomed: Vec<DependencyId> = state
            .edges
            .values()
            .filter(|edge| edge.task() == task || edge.depends_on() == task)
            .map(TaskDependency::id)
            .collect();
        for id in &doomed {
            if let Some(edge) = state.edges.remove(id) {
                state.pairs.remove(&(edge.task(), edge.depends_on()));
            }
        }
        Ok(doomed.len())
    }
}
