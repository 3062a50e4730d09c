//! Directed dependency edges between tasks.

use super::{DependencyId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Default dependency label when callers do not supply one.
pub const DEFAULT_DEPENDENCY_TYPE: &str = "BLOCKER";

/// A directed "depends on" edge: `task` is blocked until `depends_on` is
/// done.
///
/// Edges are unique per ordered `(task, depends_on)` pair, irreflexive, and
/// must not close a directed cycle; the dependency service enforces all
/// three before an edge is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDependency {
    id: DependencyId,
    task: TaskId,
    depends_on: TaskId,
    dependency_type: String,
    created_at: DateTime<Utc>,
}

impl TaskDependency {
    /// Creates an edge marking `task` as dependent on `depends_on`.
    ///
    /// A `None` dependency type falls back to
    /// [`DEFAULT_DEPENDENCY_TYPE`].
    #[must_use]
    pub fn new(
        task: TaskId,
        depends_on: TaskId,
        dependency_type: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: DependencyId::new(),
            task,
            depends_on,
            dependency_type: dependency_type
                .unwrap_or_else(|| DEFAULT_DEPENDENCY_TYPE.to_owned()),
            created_at: clock.utc(),
        }
    }

    /// Returns the edge identifier.
    #[must_use]
    pub const fn id(&self) -> DependencyId {
        self.id
    }

    /// Returns the blocked task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the blocking task.
    #[must_use]
    pub const fn depends_on(&self) -> TaskId {
        self.depends_on
    }

    /// Returns the free-form dependency label.
    #[must_use]
    pub fn dependency_type(&self) -> &str {
        &self.dependency_type
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
