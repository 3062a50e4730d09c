//! Rule-based implementation of the validator port.

use super::rules;
use crate::task::domain::TaskStatus;
use crate::task::ports::validator::{TaskValidator, ValidationLimits, ValidationResult};
use chrono::{DateTime, Utc};

/// Validator that applies the individual rules from [`super::rules`] with a
/// configured set of limits.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedTaskValidator {
    limits: ValidationLimits,
}

impl RuleBasedTaskValidator {
    /// Creates a validator with the given limits.
    #[must_use]
    pub const fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> &ValidationLimits {
        &self.limits
    }
}

impl TaskValidator for RuleBasedTaskValidator {
    fn validate_title(&self, title: &str) -> ValidationResult<()> {
        rules::validate_title(title, &self.limits)
    }

    fn validate_description(&self, description: Option<&str>) -> ValidationResult<()> {
        rules::validate_description(description, &self.limits)
    }

    fn validate_schedule(
        &self,
        start_at: Option<DateTime<Utc>>,
        due_at: Option<DateTime<Utc>>,
    ) -> ValidationResult<()> {
        rules::validate_schedule(start_at, due_at)
    }

    fn validate_progress(&self, progress: u8) -> ValidationResult<()> {
        rules::validate_progress(progress)
    }

    fn validate_status_transition(
        &self,
        from: TaskStatus,
        to: TaskStatus,
    ) -> ValidationResult<()> {
        rules::validate_status_transition(from, to)
    }

    fn validate_comment_text(&self, text: &str) -> ValidationResult<()> {
        rules::validate_comment_text(text, &self.limits)
    }

    fn validate_attachment(&self, file_name: &str, size_bytes: u64) -> ValidationResult<()> {
        rules::validate_attachment(file_name, size_bytes, &self.limits)
    }

    fn validate_tag_name(&self, name: &str) -> ValidationResult<()> {
        rules::validate_tag_name(name, &self.limits)
    }
}
