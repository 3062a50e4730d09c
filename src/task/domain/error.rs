//! Error types for task domain invariants and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested status change is not permitted by the transition table.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task whose status change was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller requested.
        to: TaskStatus,
    },

    /// The progress percentage exceeds 100.
    #[error("progress percentage {0} exceeds 100")]
    ProgressOutOfRange(u8),
}

impl TaskDomainError {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::InvalidStatusTransition { .. } => "validation.illegal_transition",
            Self::ProgressOutOfRange(_) => "validation.progress_out_of_range",
        }
    }
}

/// Error returned while parsing task statuses from storage or transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from storage or transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
