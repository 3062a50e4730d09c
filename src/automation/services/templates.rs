//! Notification templates per lifecycle event.
//!
//! Subjects and bodies are `minijinja` templates rendered against a context
//! assembled from the event payload. Missing context keys render as empty
//! rather than failing, so template edits cannot break dispatch.

use crate::automation::domain::TaskEventKind;
use minijinja::Environment;
use serde_json::{Map, Value};

/// A rendered subject/body pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    /// Rendered subject line.
    pub subject: String,
    /// Rendered plain-text body.
    pub body: String,
}

const GREETING: &str = "Hello {{ recipient }},\n\n";
const SIGNATURE: &str = "\n\u{2014} Foreman";

/// Returns the subject and body template sources for an event kind.
const fn sources(kind: TaskEventKind) -> (&'static str, &'static str) {
    match kind {
        TaskEventKind::TaskCreated => (
            "New task: {{ task_title }}",
            "task \"{{ task_title }}\" was created with priority {{ task_priority }}.\n",
        ),
        TaskEventKind::TaskAssigned => (
            "You were assigned: {{ task_title }}",
            "you are now assigned to task \"{{ task_title }}\".\n",
        ),
        TaskEventKind::TaskStatusChanged => (
            "Status changed: {{ task_title }}",
            "task \"{{ task_title }}\" moved from {{ old_status }} to {{ new_status }}.\n",
        ),
        TaskEventKind::TaskCompleted => (
            "Task completed: {{ task_title }}",
            "task \"{{ task_title }}\" is done.\n",
        ),
        TaskEventKind::SubtasksCompleted => (
            "All subtasks done: {{ task_title }}",
            "every subtask of \"{{ task_title }}\" is complete.\n",
        ),
        TaskEventKind::TaskCommentAdded => (
            "New comment on: {{ task_title }}",
            "a comment was added to \"{{ task_title }}\":\n\n{{ comment_text }}\n",
        ),
        TaskEventKind::TaskAttachmentAdded => (
            "New attachment on: {{ task_title }}",
            "file \"{{ attachment_name }}\" was attached to \"{{ task_title }}\".\n",
        ),
        TaskEventKind::TaskPriorityChanged => (
            "Priority changed: {{ task_title }}",
            "task \"{{ task_title }}\" priority moved from {{ old_priority }} to {{ new_priority }}.\n",
        ),
        TaskEventKind::TaskDeleted => (
            "Task deleted: {{ task_title }}",
            "task \"{{ task_title }}\" was deleted.\n",
        ),
        TaskEventKind::DependencyResolved => (
            "Dependency resolved: {{ task_title }}",
            "a dependency of task \"{{ task_title }}\" was resolved.\n",
        ),
        TaskEventKind::TaskDueSoon => (
            "Due soon: {{ task_title }}",
            "task \"{{ task_title }}\" is due at {{ due_at }}.\n",
        ),
        TaskEventKind::TaskOverdue => (
            "Overdue: {{ task_title }}",
            "task \"{{ task_title }}\" was due at {{ due_at }} and is not done.\n",
        ),
    }
}

/// Renders the notification for an event kind against the given context.
///
/// # Errors
///
/// Returns a [`minijinja::Error`] when template rendering fails; callers
/// treat this as a swallowed dispatch failure.
pub fn render_notification(
    kind: TaskEventKind,
    context: &Map<String, Value>,
) -> Result<RenderedNotification, minijinja::Error> {
    let environment = Environment::new();
    let (subject_source, body_source) = sources(kind);
    let subject = environment.render_str(subject_source, context)?;
    let body_core = environment.render_str(body_source, context)?;
    let greeting = environment.render_str(GREETING, context)?;
    Ok(RenderedNotification {
        subject,
        body: format!("{greeting}{body_core}{SIGNATURE}"),
    })
}
