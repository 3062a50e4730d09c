//! Dependency graph management between tasks.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::automation::domain::TaskEvent;
use crate::automation::ports::AutomationHook;
use crate::context::RequestContext;
use crate::task::domain::{DependencyId, TaskDependency, TaskId};
use crate::task::error::ValidationError;
use crate::task::ports::{
    AccessDenied, Action, Authorizer, DependencyRepository, RepositoryError, Resource,
    TaskRepository,
};

/// Errors returned by dependency graph operations.
#[derive(Debug, Error)]
pub enum DependencyGraphError {
    /// Authorization denial.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Rule check failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An edge endpoint does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The identified edge does not exist.
    #[error("dependency not found: {0}")]
    DependencyNotFound(DependencyId),

    /// Task store failure.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl DependencyGraphError {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::Forbidden(err) => err.error_key(),
            Self::Validation(err) => err.error_key(),
            Self::TaskNotFound(_) => "task.not_found",
            Self::DependencyNotFound(_) => "dependency.not_found",
            Self::Store(_) => "store.failure",
        }
    }
}

/// Manages the directed "depends on" graph between tasks.
///
/// Edges are unique per ordered pair, irreflexive, and acyclic; all three
/// are enforced here before an edge is persisted.
#[derive(Clone)]
pub struct DependencyGraphService<K>
where
    K: Clock + Send + Sync,
{
    tasks: Arc<dyn TaskRepository>,
    dependencies: Arc<dyn DependencyRepository>,
    authorizer: Arc<dyn Authorizer>,
    automation: Arc<dyn AutomationHook>,
    clock: Arc<K>,
}

impl<K> DependencyGraphService<K>
where
    K: Clock + Send + Sync,
{
    /// Creates a new dependency graph service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        dependencies: Arc<dyn DependencyRepository>,
        authorizer: Arc<dyn Authorizer>,
        automation: Arc<dyn AutomationHook>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            tasks,
            dependencies,
            authorizer,
            automation,
            clock,
        }
    }

    /// Creates an edge marking `task` as dependent on `depends_on`.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::TaskNotFound`] when either endpoint
    /// is missing, and [`DependencyGraphError::Validation`] for reflexive,
    /// duplicate, or cycle-closing edges.
    pub async fn create_dependency(
        &self,
        ctx: &RequestContext,
        task: TaskId,
        depends_on: TaskId,
        dependency_type: Option<String>,
    ) -> Result<TaskDependency, DependencyGraphError> {
        self.authorizer
            .authorize(ctx, Resource::TaskDependencies, Action::Create)
            .await?;

        if !self.tasks.exists(task).await? {
            return Err(DependencyGraphError::TaskNotFound(task));
        }
        if !self.tasks.exists(depends_on).await? {
            return Err(DependencyGraphError::TaskNotFound(depends_on));
        }
        if task == depends_on {
            return Err(ValidationError::DependencyOnSelf(task).into());
        }
        if self.dependencies.exists_edge(task, depends_on).await? {
            return Err(ValidationError::DependencyExists { task, depends_on }.into());
        }
        if self.would_create_cycle(task, depends_on).await? {
            return Err(ValidationError::DependencyCycle { task, depends_on }.into());
        }

        let edge = TaskDependency::new(task, depends_on, dependency_type, &*self.clock);
        self.dependencies.store(&edge).await?;
        Ok(edge)
    }

    /// Removes an edge and publishes [`TaskEvent::DependencyResolved`].
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::DependencyNotFound`] when the edge
    /// does not exist.
    pub async fn delete_dependency(
        &self,
        ctx: &RequestContext,
        id: DependencyId,
    ) -> Result<(), DependencyGraphError> {
        self.authorizer
            .authorize(ctx, Resource::TaskDependencies, Action::Delete)
            .await?;

        let edge = self
            .dependencies
            .find_by_id(id)
            .await?
            .ok_or(DependencyGraphError::DependencyNotFound(id))?;
        self.dependencies.delete(id).await?;

        match self.tasks.find_by_id(edge.task()).await? {
            Some(task) => {
                self.automation
                    .publish(&TaskEvent::DependencyResolved {
                        task,
                        dependency: edge,
                    })
                    .await;
            }
            None => {
                tracing::warn!(
                    task = %edge.task(),
                    "blocked task vanished before dependency-resolved event"
                );
            }
        }
        Ok(())
    }

    /// Returns the edges where the given task is the blocked endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::TaskNotFound`] when the task is
    /// missing.
    pub async fn dependencies_of(
        &self,
        ctx: &RequestContext,
        task: TaskId,
    ) -> Result<Vec<TaskDependency>, DependencyGraphError> {
        self.authorizer
            .authorize(ctx, Resource::TaskDependencies, Action::Read)
            .await?;
        if !self.tasks.exists(task).await? {
            return Err(DependencyGraphError::TaskNotFound(task));
        }
        Ok(self.dependencies.find_by_task(task).await?)
    }

    /// Returns the edges where the given task is the blocking endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::TaskNotFound`] when the task is
    /// missing.
    pub async fn dependents_of(
        &self,
        ctx: &RequestContext,
        task: TaskId,
    ) -> Result<Vec<TaskDependency>, DependencyGraphError> {
        self.authorizer
            .authorize(ctx, Resource::TaskDependencies, Action::Read)
            .await?;
        if !self.tasks.exists(task).await? {
            return Err(DependencyGraphError::TaskNotFound(task));
        }
        Ok(self.dependencies.find_by_depends_on(task).await?)
    }

    /// Returns whether the task has any dependency whose target is not
    /// done. An edge whose target no longer exists counts as unresolved.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::Store`] when lookups fail.
    pub async fn has_unresolved_dependencies(
        &self,
        ctx: &RequestContext,
        task: TaskId,
    ) -> Result<bool, DependencyGraphError> {
        self.authorizer
            .authorize(ctx, Resource::TaskDependencies, Action::Read)
            .await?;

        let edges = self.dependencies.find_by_task(task).await?;
        for edge in edges {
            let target = self.tasks.find_by_id(edge.depends_on()).await?;
            let resolved = target.is_some_and(|blocking| blocking.status().is_done());
            if !resolved {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Checks whether adding `task -> depends_on` would close a directed
    /// cycle.
    ///
    /// Breadth-first walk from `depends_on` over stored edges: the new edge
    /// closes a cycle exactly when `depends_on` already reaches `task`.
    async fn would_create_cycle(
        &self,
        task: TaskId,
        depends_on: TaskId,
    ) -> Result<bool, RepositoryError> {
        let mut visited: HashSet<TaskId> = HashSet::new();
        let mut queue: VecDeque<TaskId> = VecDeque::new();
        queue.push_back(depends_on);

        while let Some(current) = queue.pop_front() {
            if current == task {
                return Ok(true);
            }
            if !visited.insert(current) {
                continue;
            }
            for edge in self.dependencies.find_by_task(current).await? {
                if !visited.contains(&edge.depends_on()) {
                    queue.push_back(edge.depends_on());
                }
            }
        }
        Ok(false)
    }
}
