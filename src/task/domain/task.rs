//! Task aggregate root and its status state machine.

use super::{
    EmployeeId, OrganizationId, ParseTaskPriorityError, ParseTaskStatusError, ProjectId, TagId,
    TaskDomainError, TaskId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has been captured but not started.
    Backlog,
    /// Work is underway.
    InProgress,
    /// Work is awaiting review.
    Review,
    /// Work is finished.
    Done,
    /// Work cannot proceed.
    Blocked,
    /// Finished work has been reopened.
    Reopened,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Reopened => "reopened",
        }
    }

    /// Returns whether a caller-driven transition to `target` is legal.
    ///
    /// Self-transitions are always rejected. `Done` is only re-enterable via
    /// `Reopened`. Roll-up auto-completion does not consult this table; it
    /// goes through [`Task::complete_by_rollup`].
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Backlog, Self::InProgress | Self::Blocked | Self::Done)
                | (Self::InProgress, Self::Review | Self::Blocked | Self::Done)
                | (Self::Review, Self::InProgress | Self::Blocked | Self::Done)
                | (Self::Blocked, Self::Backlog | Self::InProgress | Self::Review)
                | (Self::Done, Self::Reopened)
                | (
                    Self::Reopened,
                    Self::InProgress | Self::Review | Self::Blocked | Self::Done
                )
        )
    }

    /// Returns whether this status counts as completed work.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            "reopened" => Ok(Self::Reopened),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal scheduling.
    #[default]
    Medium,
    /// Should be picked up next.
    High,
    /// Drop everything.
    Critical,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Parameter object for creating a new task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning organization.
    pub organization: OrganizationId,
    /// Owning project.
    pub project: ProjectId,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Optional parent task; tasks with a parent are subtasks.
    pub parent: Option<TaskId>,
    /// Single owning employee.
    pub owner: EmployeeId,
    /// Resolved assignee set.
    pub assignees: BTreeSet<EmployeeId>,
    /// Resolved tag set.
    pub tags: BTreeSet<TagId>,
    /// Optional scheduled start.
    pub start_at: Option<DateTime<Utc>>,
    /// Optional due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Optional effort estimate in whole minutes.
    pub estimated_minutes: Option<u32>,
}

/// Task aggregate root.
///
/// Tasks reference their parent by identifier only; subtask sets are resolved
/// through parent-indexed repository lookups rather than an in-memory object
/// graph, so deep or cyclic hierarchies cannot cause unbounded recursion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    organization: OrganizationId,
    project: ProjectId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    parent: Option<TaskId>,
    owner: EmployeeId,
    assignees: BTreeSet<EmployeeId>,
    tags: BTreeSet<TagId>,
    start_at: Option<DateTime<Utc>>,
    due_at: Option<DateTime<Utc>>,
    estimated_minutes: Option<u32>,
    actual_minutes: Option<u32>,
    progress: u8,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in `Backlog` with zero progress.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            organization: data.organization,
            project: data.project,
            title: data.title,
            description: data.description,
            status: TaskStatus::Backlog,
            priority: data.priority,
            parent: data.parent,
            owner: data.owner,
            assignees: data.assignees,
            tags: data.tags,
            start_at: data.start_at,
            due_at: data.due_at,
            estimated_minutes: data.estimated_minutes,
            actual_minutes: None,
            progress: 0,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization(&self) -> OrganizationId {
        self.organization
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the parent task identifier, if this task is a subtask.
    #[must_use]
    pub const fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    /// Returns the owning employee.
    #[must_use]
    pub const fn owner(&self) -> EmployeeId {
        self.owner
    }

    /// Returns the assignee set.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<EmployeeId> {
        &self.assignees
    }

    /// Returns the tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<TagId> {
        &self.tags
    }

    /// Returns the scheduled start, if any.
    #[must_use]
    pub const fn start_at(&self) -> Option<DateTime<Utc>> {
        self.start_at
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the effort estimate in whole minutes, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<u32> {
        self.estimated_minutes
    }

    /// Returns the recorded effort in whole minutes, if any.
    #[must_use]
    pub const fn actual_minutes(&self) -> Option<u32> {
        self.actual_minutes
    }

    /// Returns the progress percentage (0-100).
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns the completion timestamp, if the task is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a caller-driven status transition.
    ///
    /// Entering `Done` stamps the completion time and forces progress to
    /// 100; leaving `Done` via `Reopened` clears the completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the
    /// transition table rejects the change.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }

        if target == TaskStatus::Done {
            self.completed_at = Some(clock.utc());
            self.progress = 100;
        } else if self.status == TaskStatus::Done {
            self.completed_at = None;
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task done because all of its subtasks completed.
    ///
    /// This is the roll-up completion path; it bypasses the caller-facing
    /// transition table. Returns `false` without mutating when the task is
    /// already done.
    pub fn complete_by_rollup(&mut self, clock: &impl Clock) -> bool {
        if self.status == TaskStatus::Done {
            return false;
        }
        self.status = TaskStatus::Done;
        self.completed_at = Some(clock.utc());
        self.progress = 100;
        self.touch(clock);
        true
    }

    /// Replaces the task title.
    pub fn set_title(&mut self, title: String, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: String, clock: &impl Clock) {
        self.description = Some(description);
        self.touch(clock);
    }

    /// Replaces the scheduling priority.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Re-parents the task.
    pub fn set_parent(&mut self, parent: TaskId, clock: &impl Clock) {
        self.parent = Some(parent);
        self.touch(clock);
    }

    /// Replaces the scheduled start.
    pub fn set_start_at(&mut self, start_at: DateTime<Utc>, clock: &impl Clock) {
        self.start_at = Some(start_at);
        self.touch(clock);
    }

    /// Replaces the due timestamp.
    pub fn set_due_at(&mut self, due_at: DateTime<Utc>, clock: &impl Clock) {
        self.due_at = Some(due_at);
        self.touch(clock);
    }

    /// Replaces the effort estimate.
    pub fn set_estimated_minutes(&mut self, minutes: u32, clock: &impl Clock) {
        self.estimated_minutes = Some(minutes);
        self.touch(clock);
    }

    /// Replaces the recorded effort.
    pub fn set_actual_minutes(&mut self, minutes: u32, clock: &impl Clock) {
        self.actual_minutes = Some(minutes);
        self.touch(clock);
    }

    /// Sets the progress percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] when the value
    /// exceeds 100.
    pub fn set_progress(&mut self, progress: u8, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if progress > 100 {
            return Err(TaskDomainError::ProgressOutOfRange(progress));
        }
        self.progress = progress;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the assignee set wholesale. The prior set is discarded, not
    /// merged.
    pub fn replace_assignees(&mut self, assignees: BTreeSet<EmployeeId>, clock: &impl Clock) {
        self.assignees = assignees;
        self.touch(clock);
    }

    /// Removes a single assignee. Returns `false` when the employee was not
    /// assigned.
    pub fn remove_assignee(&mut self, employee: EmployeeId, clock: &impl Clock) -> bool {
        let removed = self.assignees.remove(&employee);
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Replaces the tag set wholesale.
    pub fn replace_tags(&mut self, tags: BTreeSet<TagId>, clock: &impl Clock) {
        self.tags = tags;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
