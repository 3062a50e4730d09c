//! Lifecycle event vocabulary.
//!
//! Events are published by the task services strictly after the originating
//! state change has been persisted. Each event carries a snapshot of the
//! task as it was at publication time so consumers never read back through
//! the store.

use crate::task::domain::{
    EmployeeId, Task, TaskAttachment, TaskComment, TaskDependency, TaskPriority, TaskStatus,
};
use serde::Serialize;
use std::fmt;

/// Discriminant for [`TaskEvent`], used for template lookup and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// A task was created.
    TaskCreated,
    /// An employee was assigned to a task.
    TaskAssigned,
    /// A task's status changed.
    TaskStatusChanged,
    /// A task entered `Done`.
    TaskCompleted,
    /// Every subtask of a task is done.
    SubtasksCompleted,
    /// A comment or reply was added.
    TaskCommentAdded,
    /// A file was attached.
    TaskAttachmentAdded,
    /// A task's priority changed.
    TaskPriorityChanged,
    /// A task was deleted.
    TaskDeleted,
    /// A dependency edge was removed.
    DependencyResolved,
    /// A task's due timestamp is approaching.
    TaskDueSoon,
    /// A task's due timestamp has passed.
    TaskOverdue,
}

impl TaskEventKind {
    /// Returns the canonical event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "task_created",
            Self::TaskAssigned => "task_assigned",
            Self::TaskStatusChanged => "task_status_changed",
            Self::TaskCompleted => "task_completed",
            Self::SubtasksCompleted => "subtasks_completed",
            Self::TaskCommentAdded => "task_comment_added",
            Self::TaskAttachmentAdded => "task_attachment_added",
            Self::TaskPriorityChanged => "task_priority_changed",
            Self::TaskDeleted => "task_deleted",
            Self::DependencyResolved => "dependency_resolved",
            Self::TaskDueSoon => "task_due_soon",
            Self::TaskOverdue => "task_overdue",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle event with its task snapshot and event-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task was created.
    TaskCreated {
        /// Snapshot of the created task.
        task: Task,
    },
    /// An employee was assigned to a task. Published once per member of the
    /// full assignee set on every assignment call.
    TaskAssigned {
        /// Snapshot of the task after assignment.
        task: Task,
        /// The notified assignee.
        assignee: EmployeeId,
    },
    /// A task's status changed.
    TaskStatusChanged {
        /// Snapshot of the task after the change.
        task: Task,
        /// Status before the change.
        from: TaskStatus,
        /// Status after the change.
        to: TaskStatus,
    },
    /// A task entered `Done`, by caller transition or roll-up.
    TaskCompleted {
        /// Snapshot of the completed task.
        task: Task,
    },
    /// Every subtask of the task is done.
    SubtasksCompleted {
        /// Snapshot of the parent task.
        task: Task,
    },
    /// A comment or reply was added.
    TaskCommentAdded {
        /// Snapshot of the commented task.
        task: Task,
        /// The new comment.
        comment: TaskComment,
    },
    /// A file was attached.
    TaskAttachmentAdded {
        /// Snapshot of the task.
        task: Task,
        /// The new attachment record.
        attachment: TaskAttachment,
    },
    /// A task's priority changed.
    TaskPriorityChanged {
        /// Snapshot of the task after the change.
        task: Task,
        /// Priority before the change.
        from: TaskPriority,
        /// Priority after the change.
        to: TaskPriority,
    },
    /// A task was deleted.
    TaskDeleted {
        /// Final snapshot of the removed task.
        task: Task,
    },
    /// A dependency edge was removed.
    DependencyResolved {
        /// Snapshot of the formerly blocked task.
        task: Task,
        /// The removed edge.
        dependency: TaskDependency,
    },
    /// A task's due timestamp falls within the scan window.
    TaskDueSoon {
        /// Snapshot of the task.
        task: Task,
    },
    /// A task's due timestamp has passed without completion.
    TaskOverdue {
        /// Snapshot of the task.
        task: Task,
    },
}

impl TaskEvent {
    /// Returns the event discriminant.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        match self {
            Self::TaskCreated { .. } => TaskEventKind::TaskCreated,
            Self::TaskAssigned { .. } => TaskEventKind::TaskAssigned,
            Self::TaskStatusChanged { .. } => TaskEventKind::TaskStatusChanged,
            Self::TaskCompleted { .. } => TaskEventKind::TaskCompleted,
            Self::SubtasksCompleted { .. } => TaskEventKind::SubtasksCompleted,
            Self::TaskCommentAdded { .. } => TaskEventKind::TaskCommentAdded,
            Self::TaskAttachmentAdded { .. } => TaskEventKind::TaskAttachmentAdded,
            Self::TaskPriorityChanged { .. } => TaskEventKind::TaskPriorityChanged,
            Self::TaskDeleted { .. } => TaskEventKind::TaskDeleted,
            Self::DependencyResolved { .. } => TaskEventKind::DependencyResolved,
            Self::TaskDueSoon { .. } => TaskEventKind::TaskDueSoon,
            Self::TaskOverdue { .. } => TaskEventKind::TaskOverdue,
        }
    }

    /// Returns the task snapshot carried by the event.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::TaskCreated { task }
            | Self::TaskAssigned { task, .. }
            | Self::TaskStatusChanged { task, .. }
            | Self::TaskCompleted { task }
            | Self::SubtasksCompleted { task }
            | Self::TaskCommentAdded { task, .. }
            | Self::TaskAttachmentAdded { task, .. }
            | Self::TaskPriorityChanged { task, .. }
            | Self::TaskDeleted { task }
            | Self::DependencyResolved { task, .. }
            | Self::TaskDueSoon { task }
            | Self::TaskOverdue { task } => task,
        }
    }
}
