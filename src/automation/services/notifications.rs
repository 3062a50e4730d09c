//! Notification-dispatching automation hook.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::automation::domain::TaskEvent;
use crate::automation::ports::{AutomationHook, EmailMessage, Mailer};
use crate::automation::services::templates::{RenderedNotification, render_notification};
use crate::task::domain::EmployeeId;
use crate::task::ports::directory::{EmployeeContact, EmployeeDirectory};

/// Automation hook that turns lifecycle events into notifications.
///
/// Recipients are the task's assignee set plus its owner, deduplicated and
/// resolved through the employee directory. Every failure on this path
/// (directory lookup, template rendering, delivery) is logged and swallowed:
/// by the time an event reaches the hook the state change is already
/// durable, and a notification outage must never surface to the caller.
#[derive(Clone)]
pub struct NotificationAutomation {
    mailer: Arc<dyn Mailer>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl NotificationAutomation {
    /// Creates a hook delivering through the given mailer and directory.
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { mailer, directory }
    }

    /// Resolves the recipient contact list for an event.
    async fn recipients(&self, event: &TaskEvent) -> Vec<EmployeeContact> {
        let task = event.task();
        let mut ids: BTreeSet<EmployeeId> = task.assignees().clone();
        ids.insert(task.owner());
        if let TaskEvent::TaskAssigned { assignee, .. } = event {
            ids.insert(*assignee);
        }

        let mut contacts = Vec::with_capacity(ids.len());
        for id in ids {
            match self.directory.find(id).await {
                Ok(Some(contact)) => contacts.push(contact),
                Ok(None) => {
                    tracing::debug!(employee = %id, "skipping unknown notification recipient");
                }
                Err(err) => {
                    tracing::warn!(employee = %id, error = %err, "recipient lookup failed");
                }
            }
        }
        contacts
    }

    async fn dispatch(&self, contact: &EmployeeContact, rendered: RenderedNotification) {
        let message = EmailMessage {
            to: contact.email.clone(),
            subject: rendered.subject,
            body: rendered.body,
        };
        if let Err(err) = self.mailer.send(&message).await {
            tracing::warn!(
                recipient = %contact.email,
                error = %err,
                "notification delivery failed"
            );
        }
    }
}

#[async_trait]
impl AutomationHook for NotificationAutomation {
    async fn publish(&self, event: &TaskEvent) {
        let recipients = self.recipients(event).await;
        if recipients.is_empty() {
            tracing::debug!(kind = %event.kind(), "event has no reachable recipients");
            return;
        }

        for contact in &recipients {
            let context = build_event_context(event, &contact.display_name);
            match render_notification(event.kind(), &context) {
                Ok(rendered) => self.dispatch(contact, rendered).await,
                Err(err) => {
                    tracing::warn!(
                        kind = %event.kind(),
                        error = %err,
                        "notification rendering failed"
                    );
                }
            }
        }
    }
}

/// Assembles the template context for one event and recipient.
#[must_use]
pub fn build_event_context(event: &TaskEvent, recipient: &str) -> Map<String, Value> {
    let task = event.task();
    let mut context = Map::new();
    context.insert("recipient".to_owned(), Value::String(recipient.to_owned()));
    context.insert("task_title".to_owned(), Value::String(task.title().to_owned()));
    context.insert(
        "task_status".to_owned(),
        Value::String(task.status().as_str().to_owned()),
    );
    context.insert(
        "task_priority".to_owned(),
        Value::String(task.priority().as_str().to_owned()),
    );
    context.insert(
        "task_progress".to_owned(),
        Value::Number(task.progress().into()),
    );
    if let Some(due_at) = task.due_at() {
        context.insert("due_at".to_owned(), Value::String(due_at.to_rfc3339()));
    }

    match event {
        TaskEvent::TaskStatusChanged { from, to, .. } => {
            context.insert(
                "old_status".to_owned(),
                Value::String(from.as_str().to_owned()),
            );
            context.insert("new_status".to_owned(), Value::String(to.as_str().to_owned()));
        }
        TaskEvent::TaskPriorityChanged { from, to, .. } => {
            context.insert(
                "old_priority".to_owned(),
                Value::String(from.as_str().to_owned()),
            );
            context.insert(
                "new_priority".to_owned(),
                Value::String(to.as_str().to_owned()),
            );
        }
        TaskEvent::TaskCommentAdded { comment, .. } => {
            context.insert(
                "comment_text".to_owned(),
                Value::String(comment.text().to_owned()),
            );
        }
        TaskEvent::TaskAttachmentAdded { attachment, .. } => {
            context.insert(
                "attachment_name".to_owned(),
                Value::String(attachment.file_name().to_owned()),
            );
        }
        TaskEvent::DependencyResolved { dependency, .. } => {
            context.insert(
                "dependency_type".to_owned(),
                Value::String(dependency.dependency_type().to_owned()),
            );
        }
        _ => {}
    }

    context
}
