//! Validation errors for the task engine.
//!
//! Uses `thiserror` for typed variants that callers can inspect. Every
//! variant carries a stable machine-readable key via
//! [`ValidationError::error_key`] so transports can localise messages
//! without parsing display strings.

use crate::task::domain::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors raised by the task validator rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is missing or blank after trimming.
    #[error("task title is required")]
    TitleRequired,

    /// The title exceeds the configured length limit.
    #[error("task title has {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// Maximum allowed number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// The description exceeds the configured length limit.
    #[error("task description has {actual} characters, exceeds limit of {max}")]
    DescriptionTooLong {
        /// Maximum allowed number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// The due timestamp precedes the scheduled start.
    #[error("task due date precedes its start date")]
    DueBeforeStart,

    /// The progress percentage exceeds 100.
    #[error("progress percentage {0} exceeds 100")]
    ProgressOutOfRange(u8),

    /// Progress was set explicitly on a task whose progress is derived from
    /// subtasks.
    #[error("progress of task {0} is derived from its subtasks")]
    ProgressDerived(TaskId),

    /// The requested status change is not permitted by the transition table.
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller requested.
        to: TaskStatus,
    },

    /// An assignment call carried an empty employee list.
    #[error("at least one assignee is required")]
    AssigneesRequired,

    /// A task was made its own parent.
    #[error("task {0} cannot be its own parent")]
    ParentIsSelf(TaskId),

    /// A task still has subtasks and cascade deletion was not requested.
    #[error("task {0} has subtasks; pass delete_subtasks to remove them")]
    SubtasksPresent(TaskId),

    /// A dependency edge for the ordered pair already exists.
    #[error("dependency of task {task} on task {depends_on} already exists")]
    DependencyExists {
        /// The blocked task.
        task: TaskId,
        /// The blocking task.
        depends_on: TaskId,
    },

    /// A task was made dependent on itself.
    #[error("task {0} cannot depend on itself")]
    DependencyOnSelf(TaskId),

    /// The edge would close a directed dependency cycle.
    #[error("dependency of task {task} on task {depends_on} would create a cycle")]
    DependencyCycle {
        /// The blocked task.
        task: TaskId,
        /// The blocking task.
        depends_on: TaskId,
    },

    /// The comment text is missing or blank after trimming.
    #[error("comment text is required")]
    CommentRequired,

    /// The comment text exceeds the configured length limit.
    #[error("comment has {actual} characters, exceeds limit of {max}")]
    CommentTooLong {
        /// Maximum allowed number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// The attachment file name is missing or blank after trimming.
    #[error("attachment file name is required")]
    AttachmentNameRequired,

    /// The attachment payload exceeds the configured size limit.
    #[error("attachment has {actual_bytes} bytes, exceeds limit of {max_bytes}")]
    AttachmentTooLarge {
        /// Maximum allowed number of bytes.
        max_bytes: u64,
        /// Actual number of bytes.
        actual_bytes: u64,
    },

    /// The tag name is missing or blank after trimming.
    #[error("tag name is required")]
    TagNameRequired,

    /// The tag name exceeds the configured length limit.
    #[error("tag name has {actual} characters, exceeds limit of {max}")]
    TagNameTooLong {
        /// Maximum allowed number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },
}

impl ValidationError {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::TitleRequired => "validation.title_required",
            Self::TitleTooLong { .. } => "validation.title_too_long",
            Self::DescriptionTooLong { .. } => "validation.description_too_long",
            Self::DueBeforeStart => "validation.due_before_start",
            Self::ProgressOutOfRange(_) => "validation.progress_out_of_range",
            Self::ProgressDerived(_) => "validation.progress_derived",
            Self::IllegalTransition { .. } => "validation.illegal_transition",
            Self::AssigneesRequired => "validation.assignees_required",
            Self::ParentIsSelf(_) => "validation.parent_is_self",
            Self::SubtasksPresent(_) => "validation.subtasks_present",
            Self::DependencyExists { .. } => "validation.dependency_exists",
            Self::DependencyOnSelf(_) => "validation.dependency_on_self",
            Self::DependencyCycle { .. } => "validation.dependency_cycle",
            Self::CommentRequired => "validation.comment_required",
            Self::CommentTooLong { .. } => "validation.comment_too_long",
            Self::AttachmentNameRequired => "validation.attachment_name_required",
            Self::AttachmentTooLarge { .. } => "validation.attachment_too_large",
            Self::TagNameRequired => "validation.tag_name_required",
            Self::TagNameTooLong { .. } => "validation.tag_name_too_long",
        }
    }
}
