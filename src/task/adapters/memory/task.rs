//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::{EmployeeId, OrganizationId, Task, TaskId};
use crate::task::ports::{
    EntityKind, RepositoryError, RepositoryResult, TaskQuery, TaskRepository,
};

use super::poisoned;

/// Thread-safe in-memory task repository with a parent-id index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    parent_index: HashMap<TaskId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn index_parent(state: &mut InMemoryTaskState, task: &Task) {
    if let Some(parent) = task.parent() {
        state.parent_index.entry(parent).or_default().push(task.id());
    }
}

fn remove_from_parent_index(state: &mut InMemoryTaskState, task_id: TaskId, parent: TaskId) {
    if let Some(ids) = state.parent_index.get_mut(&parent) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            state.parent_index.remove(&parent);
        }
    }
}

fn matches_query(task: &Task, query: &TaskQuery) -> bool {
    if query.status.is_some_and(|status| task.status() != status) {
        return false;
    }
    if query
        .priority
        .is_some_and(|priority| task.priority() != priority)
    {
        return false;
    }
    if query
        .assignee
        .is_some_and(|assignee| !task.assignees().contains(&assignee))
    {
        return false;
    }
    if query.parent.is_some_and(|parent| task.parent() != Some(parent)) {
        return false;
    }
    if let Some(needle) = &query.title_contains {
        let haystack = task.title().to_lowercase();
        if !haystack.contains(&needle.to_lowercase()) {
            return false;
        }
    }
    true
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::duplicate(EntityKind::Task, task.id()));
        }
        index_parent(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let old_task = state
            .tasks
            .get(&task.id())
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Task, task.id()))?
            .clone();

        if old_task.parent() != task.parent() {
            if let Some(old_parent) = old_task.parent() {
                remove_from_parent_index(&mut state, task.id(), old_parent);
            }
            index_parent(&mut state, task);
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Task, id))?;
        if let Some(parent) = task.parent() {
            remove_from_parent_index(&mut state, id, parent);
        }
        state.parent_index.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn exists(&self, id: TaskId) -> RepositoryResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.contains_key(&id))
    }

    async fn find_by_parent(&self, parent: TaskId) -> RepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let children = state
            .parent_index
            .get(&parent)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(children)
    }

    async fn count_incomplete_subtasks(&self, parent: TaskId) -> RepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        let count = state
            .parent_index
            .get(&parent)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id))
                    .filter(|task| !task.status().is_done())
                    .count()
            })
            .unwrap_or_default();
        Ok(count)
    }

    async fn find_by_assignee(
        &self,
        organization: OrganizationId,
        assignee: EmployeeId,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| {
                task.organization() == organization && task.assignees().contains(&assignee)
            })
            .cloned()
            .collect())
    }

    async fn find_by_organization(
        &self,
        organization: OrganizationId,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.organization() == organization)
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        organization: OrganizationId,
        query: &TaskQuery,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.organization() == organization && matches_query(task, query))
            .cloned()
            .collect())
    }

    async fn find_due_between(
        &self,
        organization: OrganizationId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| {
                task.organization() == organization
                    && !task.status().is_done()
                    && task.due_at().is_some_and(|due| due > from && due <= until)
            })
            .cloned()
            .collect())
    }

    async fn find_overdue(
        &self,
        organization: OrganizationId,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| {
                task.organization() == organization
                    && !task.status().is_done()
                    && task.due_at().is_some_and(|due| due < now)
            })
            .cloned()
            .collect())
    }
}
