//! Validator port for task mutations.
//!
//! Rule checks run before any persistence: the lifecycle service composes
//! these calls per operation and aborts on the first failure. Implementations
//! must be stateless and thread-safe.

use crate::task::domain::TaskStatus;
use crate::task::error::ValidationError;
use chrono::{DateTime, Utc};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Port for rule checks ahead of task mutations.
pub trait TaskValidator: Send + Sync {
    /// Validates a task title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the title is blank or too long.
    fn validate_title(&self, title: &str) -> ValidationResult<()>;

    /// Validates an optional task description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the description exceeds the limit.
    fn validate_description(&self, description: Option<&str>) -> ValidationResult<()>;

    /// Validates the start/due pair.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DueBeforeStart`] when both are present and
    /// the due timestamp precedes the start.
    fn validate_schedule(
        &self,
        start_at: Option<DateTime<Utc>>,
        due_at: Option<DateTime<Utc>>,
    ) -> ValidationResult<()>;

    /// Validates an explicit progress percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ProgressOutOfRange`] when above 100.
    fn validate_progress(&self, progress: u8) -> ValidationResult<()>;

    /// Validates a caller-driven status transition.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] when the transition
    /// table rejects the change.
    fn validate_status_transition(&self, from: TaskStatus, to: TaskStatus)
    -> ValidationResult<()>;

    /// Validates comment text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the text is blank or too long.
    fn validate_comment_text(&self, text: &str) -> ValidationResult<()>;

    /// Validates an attachment upload's name and size.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name is blank or the payload
    /// exceeds the size limit.
    fn validate_attachment(&self, file_name: &str, size_bytes: u64) -> ValidationResult<()>;

    /// Validates a tag name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name is blank or too long.
    fn validate_tag_name(&self, name: &str) -> ValidationResult<()>;
}

/// Configurable limits applied by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
    /// Maximum comment length in characters.
    pub max_comment_chars: usize,
    /// Maximum tag name length in characters.
    pub max_tag_name_chars: usize,
    /// Maximum attachment payload size in bytes.
    pub max_attachment_bytes: u64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 250,
            max_description_chars: 50_000,
            max_comment_chars: 10_000,
            max_tag_name_chars: 50,
            max_attachment_bytes: 25 * 1024 * 1024, // 25 MiB
        }
    }
}

impl ValidationLimits {
    /// Creates a configuration with reduced limits.
    ///
    /// Useful for resource-constrained deployments.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_title_chars: 120,
            max_description_chars: 10_000,
            max_comment_chars: 2_000,
            max_tag_name_chars: 30,
            max_attachment_bytes: 1024 * 1024, // 1 MiB
        }
    }
}
