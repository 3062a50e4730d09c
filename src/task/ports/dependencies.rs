//! Repository port for directed dependency edges.

use super::repository::RepositoryResult;
use crate::task::domain::{DependencyId, TaskDependency, TaskId};
use async_trait::async_trait;

/// Dependency-edge persistence contract.
#[async_trait]
pub trait DependencyRepository: Send + Sync {
    /// Stores a new edge.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the edge id
    /// already exists.
    async fn store(&self, edge: &TaskDependency) -> RepositoryResult<()>;

    /// Finds an edge by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: DependencyId) -> RepositoryResult<Option<TaskDependency>>;

    /// Returns whether an edge for the ordered pair exists.
    async fn exists_edge(&self, task: TaskId, depends_on: TaskId) -> RepositoryResult<bool>;

    /// Returns the edges where the given task is the blocked endpoint
    /// (its dependencies).
    async fn find_by_task(&self, task: TaskId) -> RepositoryResult<Vec<TaskDependency>>;

    /// Returns the edges where the given task is the blocking endpoint
    /// (its dependents).
    async fn find_by_depends_on(&self, depends_on: TaskId)
    -> RepositoryResult<Vec<TaskDependency>>;

    /// Removes a single edge.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the edge does not
    /// exist.
    async fn delete(&self, id: DependencyId) -> RepositoryResult<()>;

    /// Removes every edge touching the given task, in either direction.
    /// Returns the removed count.
    async fn delete_touching(&self, task: TaskId) -> RepositoryResult<usize>;
}
