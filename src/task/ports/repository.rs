//! Repository port for task persistence and relationship lookups.

use crate::task::domain::{EmployeeId, OrganizationId, Task, TaskId, TaskPriority, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for repository operations across the task store.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Entity kinds persisted by the task store, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Task aggregate.
    Task,
    /// Task comment.
    Comment,
    /// Dependency edge.
    Dependency,
    /// Task tag.
    Tag,
    /// Task attachment.
    Attachment,
}

impl EntityKind {
    /// Returns the lowercase entity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Comment => "comment",
            Self::Dependency => "dependency",
            Self::Tag => "tag",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by task-store repository implementations.
///
/// The engine's repositories share one error type: every entity lives in the
/// same store and services treat persistence failures uniformly.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The identified record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing record.
        entity: EntityKind,
        /// Identifier that failed to resolve.
        id: Uuid,
    },

    /// A record with the same identifier already exists.
    #[error("duplicate {entity}: {id}")]
    Duplicate {
        /// Kind of the conflicting record.
        entity: EntityKind,
        /// Identifier that collided.
        id: Uuid,
    },

    /// Persistence-layer failure.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Builds a not-found error for the given entity kind.
    #[must_use]
    pub fn not_found(entity: EntityKind, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Builds a duplicate-record error for the given entity kind.
    #[must_use]
    pub fn duplicate(entity: EntityKind, id: impl Into<Uuid>) -> Self {
        Self::Duplicate {
            entity,
            id: id.into(),
        }
    }

    /// Wraps a storage-layer error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Filter for task searches within one organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Match tasks in this status.
    pub status: Option<TaskStatus>,
    /// Match tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Match tasks assigned to this employee.
    pub assignee: Option<EmployeeId>,
    /// Match direct subtasks of this task.
    pub parent: Option<TaskId>,
    /// Case-insensitive title substring.
    pub title_contains: Option<String>,
}

impl TaskQuery {
    /// Creates an empty filter matching every task in the organization.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the filter to tasks assigned to an employee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: EmployeeId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restricts the filter to direct subtasks of a task.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Restricts the filter to titles containing the given text.
    #[must_use]
    pub fn with_title_contains(mut self, text: impl Into<String>) -> Self {
        self.title_contains = Some(text.into());
        self
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] when the task id already
    /// exists.
    async fn store(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> RepositoryResult<()>;

    /// Removes a task record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> RepositoryResult<()>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns whether a task with the given identifier exists.
    async fn exists(&self, id: TaskId) -> RepositoryResult<bool>;

    /// Returns the direct subtasks of the given task.
    async fn find_by_parent(&self, parent: TaskId) -> RepositoryResult<Vec<Task>>;

    /// Counts direct subtasks whose status is not `Done`.
    async fn count_incomplete_subtasks(&self, parent: TaskId) -> RepositoryResult<usize>;

    /// Returns tasks in the organization where the employee is an assignee.
    async fn find_by_assignee(
        &self,
        organization: OrganizationId,
        assignee: EmployeeId,
    ) -> RepositoryResult<Vec<Task>>;

    /// Returns every task in the organization.
    async fn find_by_organization(
        &self,
        organization: OrganizationId,
    ) -> RepositoryResult<Vec<Task>>;

    /// Returns tasks in the organization matching the filter.
    async fn search(
        &self,
        organization: OrganizationId,
        query: &TaskQuery,
    ) -> RepositoryResult<Vec<Task>>;

    /// Returns not-done tasks whose due timestamp falls in `(from, until]`.
    async fn find_due_between(
        &self,
        organization: OrganizationId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Task>>;

    /// Returns not-done tasks whose due timestamp precedes `now`.
    async fn find_overdue(
        &self,
        organization: OrganizationId,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Task>>;
}
