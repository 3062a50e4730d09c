//! In-memory automation adapters for tests and reference wiring.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::automation::domain::{TaskEvent, TaskEventKind};
use crate::automation::ports::{AutomationHook, EmailMessage, Mailer, MailerError};

/// Hook that records every published event for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    events: Arc<Mutex<Vec<TaskEvent>>>,
}

impl RecordingHook {
    /// Creates an empty recording hook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the published events in publication order.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }

    /// Returns the kinds of the published events in publication order.
    #[must_use]
    pub fn kinds(&self) -> Vec<TaskEventKind> {
        self.events().iter().map(TaskEvent::kind).collect()
    }

    /// Discards all recorded events.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

#[async_trait]
impl AutomationHook for RecordingHook {
    async fn publish(&self, event: &TaskEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Hook that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHook;

#[async_trait]
impl AutomationHook for NullHook {
    async fn publish(&self, _event: &TaskEvent) {}
}

/// Mailer that collects every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailbox {
    messages: Arc<Mutex<Vec<EmailMessage>>>,
}

impl InMemoryMailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the collected messages in send order.
    #[must_use]
    pub fn messages(&self) -> Vec<EmailMessage> {
        self.messages
            .lock()
            .map_or_else(|_| Vec::new(), |messages| messages.clone())
    }
}

#[async_trait]
impl Mailer for InMemoryMailbox {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|err| MailerError::delivery(std::io::Error::other(err.to_string())))?;
        messages.push(message.clone());
        Ok(())
    }
}
