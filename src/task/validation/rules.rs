//! Individual validation rule implementations.
//!
//! Each rule is implemented as a pure function that validates a specific
//! aspect of a task mutation. Rules return `Ok(())` on success or a specific
//! `ValidationError` on failure.

use crate::task::domain::TaskStatus;
use crate::task::error::ValidationError;
use crate::task::ports::validator::ValidationLimits;
use chrono::{DateTime, Utc};

/// Validates that a title is present and within the configured length.
///
/// # Errors
///
/// Returns `ValidationError::TitleRequired` for blank input and
/// `ValidationError::TitleTooLong` above the limit.
pub fn validate_title(title: &str, limits: &ValidationLimits) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    let char_count = title.chars().count();
    if char_count > limits.max_title_chars {
        return Err(ValidationError::TitleTooLong {
            max: limits.max_title_chars,
            actual: char_count,
        });
    }
    Ok(())
}

/// Validates an optional description against the configured length.
///
/// # Errors
///
/// Returns `ValidationError::DescriptionTooLong` above the limit.
pub fn validate_description(
    description: Option<&str>,
    limits: &ValidationLimits,
) -> Result<(), ValidationError> {
    let Some(text) = description else {
        return Ok(());
    };
    let char_count = text.chars().count();
    if char_count > limits.max_description_chars {
        return Err(ValidationError::DescriptionTooLong {
            max: limits.max_description_chars,
            actual: char_count,
        });
    }
    Ok(())
}

/// Validates that a due timestamp does not precede the scheduled start.
///
/// Either side may be absent; only a fully specified, inverted pair fails.
///
/// # Errors
///
/// Returns `ValidationError::DueBeforeStart` for an inverted pair.
pub fn validate_schedule(
    start_at: Option<DateTime<Utc>>,
    due_at: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(due)) = (start_at, due_at)
        && due < start
    {
        return Err(ValidationError::DueBeforeStart);
    }
    Ok(())
}

/// Validates an explicit progress percentage.
///
/// # Errors
///
/// Returns `ValidationError::ProgressOutOfRange` above 100.
pub const fn validate_progress(progress: u8) -> Result<(), ValidationError> {
    if progress > 100 {
        return Err(ValidationError::ProgressOutOfRange(progress));
    }
    Ok(())
}

/// Validates a caller-driven status transition against the domain table.
///
/// # Errors
///
/// Returns `ValidationError::IllegalTransition` when the table rejects the
/// change.
pub const fn validate_status_transition(
    from: TaskStatus,
    to: TaskStatus,
) -> Result<(), ValidationError> {
    if !from.can_transition_to(to) {
        return Err(ValidationError::IllegalTransition { from, to });
    }
    Ok(())
}

/// Validates comment text presence and length.
///
/// # Errors
///
/// Returns `ValidationError::CommentRequired` for blank input and
/// `ValidationError::CommentTooLong` above the limit.
pub fn validate_comment_text(
    text: &str,
    limits: &ValidationLimits,
) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::CommentRequired);
    }
    let char_count = text.chars().count();
    if char_count > limits.max_comment_chars {
        return Err(ValidationError::CommentTooLong {
            max: limits.max_comment_chars,
            actual: char_count,
        });
    }
    Ok(())
}

/// Validates an attachment's file name and payload size.
///
/// # Errors
///
/// Returns `ValidationError::AttachmentNameRequired` for a blank name and
/// `ValidationError::AttachmentTooLarge` above the size limit.
pub fn validate_attachment(
    file_name: &str,
    size_bytes: u64,
    limits: &ValidationLimits,
) -> Result<(), ValidationError> {
    if file_name.trim().is_empty() {
        return Err(ValidationError::AttachmentNameRequired);
    }
    if size_bytes > limits.max_attachment_bytes {
        return Err(ValidationError::AttachmentTooLarge {
            max_bytes: limits.max_attachment_bytes,
            actual_bytes: size_bytes,
        });
    }
    Ok(())
}

/// Validates a tag name's presence and length.
///
/// # Errors
///
/// Returns `ValidationError::TagNameRequired` for blank input and
/// `ValidationError::TagNameTooLong` above the limit.
pub fn validate_tag_name(name: &str, limits: &ValidationLimits) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::TagNameRequired);
    }
    let char_count = name.chars().count();
    if char_count > limits.max_tag_name_chars {
        return Err(ValidationError::TagNameTooLong {
            max: limits.max_tag_name_chars,
            actual: char_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn limits() -> ValidationLimits {
        ValidationLimits::default()
    }

    #[rstest]
    fn validate_title_accepts_reasonable_title() {
        assert!(validate_title("Design API", &limits()).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn validate_title_rejects_blank_input(#[case] title: &str) {
        assert_eq!(
            validate_title(title, &limits()),
            Err(ValidationError::TitleRequired)
        );
    }

    #[rstest]
    fn validate_title_rejects_overlong_title() {
        let title = "x".repeat(251);
        assert_eq!(
            validate_title(&title, &limits()),
            Err(ValidationError::TitleTooLong {
                max: 250,
                actual: 251
            })
        );
    }

    #[rstest]
    fn validate_description_accepts_absent_description() {
        assert!(validate_description(None, &limits()).is_ok());
    }

    #[rstest]
    fn validate_description_rejects_overlong_text() {
        let text = "d".repeat(50_001);
        assert_eq!(
            validate_description(Some(&text), &limits()),
            Err(ValidationError::DescriptionTooLong {
                max: 50_000,
                actual: 50_001
            })
        );
    }

    #[rstest]
    fn validate_schedule_accepts_ordered_pair() {
        let start = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let due = chrono::Utc.with_ymd_and_hms(2026, 3, 5, 17, 0, 0).unwrap();
        assert!(validate_schedule(Some(start), Some(due)).is_ok());
    }

    #[rstest]
    fn validate_schedule_rejects_inverted_pair() {
        let start = chrono::Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let due = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();
        assert_eq!(
            validate_schedule(Some(start), Some(due)),
            Err(ValidationError::DueBeforeStart)
        );
    }

    #[rstest]
    fn validate_schedule_accepts_half_open_pairs() {
        let start = chrono::Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        assert!(validate_schedule(Some(start), None).is_ok());
        assert!(validate_schedule(None, Some(start)).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(50)]
    #[case(100)]
    fn validate_progress_accepts_in_range(#[case] progress: u8) {
        assert!(validate_progress(progress).is_ok());
    }

    #[rstest]
    fn validate_progress_rejects_above_hundred() {
        assert_eq!(
            validate_progress(101),
            Err(ValidationError::ProgressOutOfRange(101))
        );
    }

    #[rstest]
    fn validate_status_transition_consults_domain_table() {
        assert!(validate_status_transition(TaskStatus::Backlog, TaskStatus::InProgress).is_ok());
        assert_eq!(
            validate_status_transition(TaskStatus::Done, TaskStatus::InProgress),
            Err(ValidationError::IllegalTransition {
                from: TaskStatus::Done,
                to: TaskStatus::InProgress
            })
        );
    }

    #[rstest]
    fn validate_comment_text_rejects_blank_input() {
        assert_eq!(
            validate_comment_text("  ", &limits()),
            Err(ValidationError::CommentRequired)
        );
    }

    #[rstest]
    fn validate_attachment_rejects_oversized_payload() {
        let max = limits().max_attachment_bytes;
        assert_eq!(
            validate_attachment("logs.txt", max + 1, &limits()),
            Err(ValidationError::AttachmentTooLarge {
                max_bytes: max,
                actual_bytes: max + 1
            })
        );
    }

    #[rstest]
    fn validate_tag_name_rejects_overlong_name() {
        let name = "t".repeat(51);
        assert_eq!(
            validate_tag_name(&name, &limits()),
            Err(ValidationError::TagNameTooLong {
                max: 50,
                actual: 51
            })
        );
    }
}
