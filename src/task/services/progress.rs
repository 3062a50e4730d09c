//! Progress roll-up from direct subtasks.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::automation::domain::TaskEvent;
use crate::automation::ports::AutomationHook;
use crate::task::domain::{TaskDomainError, TaskId};
use crate::task::ports::{RepositoryError, TaskRepository};

/// Errors returned by progress aggregation.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The task whose progress was requested does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Domain invariant failure while applying the computed value.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task store failure.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl ProgressError {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "task.not_found",
            Self::Domain(err) => err.error_key(),
            Self::Store(_) => "store.failure",
        }
    }
}

/// Recomputes a parent task's completion percentage from its direct
/// subtasks and auto-closes the parent once every subtask is done.
///
/// Only direct children participate; deeper descendants roll up level by
/// level as each intermediate parent completes.
#[derive(Clone)]
pub struct ProgressService<K>
where
    K: Clock + Send + Sync,
{
    tasks: Arc<dyn TaskRepository>,
    automation: Arc<dyn AutomationHook>,
    clock: Arc<K>,
}

impl<K> ProgressService<K>
where
    K: Clock + Send + Sync,
{
    /// Creates a new progress service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        automation: Arc<dyn AutomationHook>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            tasks,
            automation,
            clock,
        }
    }

    /// Recomputes the task's progress from its direct subtasks.
    ///
    /// Returns `None` without touching the task when it has no subtasks, so
    /// an explicitly set progress value survives. Otherwise persists
    /// `floor(100 * done / total)` and returns it, publishing
    /// [`TaskEvent::SubtasksCompleted`] when the ratio reaches 100%.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] when the task is missing or the store
    /// rejects the update.
    pub async fn recalculate(&self, id: TaskId) -> Result<Option<u8>, ProgressError> {
        let children = self.tasks.find_by_parent(id).await?;
        if children.is_empty() {
            return Ok(None);
        }

        let total = children.len();
        let done = children
            .iter()
            .filter(|child| child.status().is_done())
            .count();
        #[expect(
            clippy::integer_division,
            reason = "progress percentage truncates toward zero"
        )]
        let ratio = (100 * done) / total;
        let percentage = u8::try_from(ratio).unwrap_or(100);

        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(ProgressError::TaskNotFound(id))?;
        task.set_progress(percentage, &*self.clock)?;
        self.tasks.update(&task).await?;

        if done == total {
            self.automation
                .publish(&TaskEvent::SubtasksCompleted { task })
                .await;
        }
        Ok(Some(percentage))
    }

    /// Marks the task done when its incomplete-subtask count is zero.
    ///
    /// Returns `true` only when this call closed the task: tasks without
    /// subtasks, tasks with unfinished subtasks, and tasks that are already
    /// done are all left untouched. Closing publishes
    /// [`TaskEvent::TaskCompleted`] for the parent.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] when the task is missing or the store
    /// rejects the update.
    pub async fn auto_close(&self, id: TaskId) -> Result<bool, ProgressError> {
        let children = self.tasks.find_by_parent(id).await?;
        if children.is_empty() {
            return Ok(false);
        }
        let incomplete = self.tasks.count_incomplete_subtasks(id).await?;
        if incomplete > 0 {
            return Ok(false);
        }

        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(ProgressError::TaskNotFound(id))?;
        if !task.complete_by_rollup(&*self.clock) {
            return Ok(false);
        }
        self.tasks.update(&task).await?;
        self.automation
            .publish(&TaskEvent::TaskCompleted { task })
            .await;
        Ok(true)
    }
}
