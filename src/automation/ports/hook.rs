//! Automation hook port.

use crate::automation::domain::TaskEvent;
use async_trait::async_trait;

/// Consumer of lifecycle events.
///
/// `publish` is infallible by contract: implementations must absorb their
/// own failures (logging them as appropriate) so event consumption can never
/// affect the state change that produced the event. Publication happens
/// strictly after the originating mutation has been persisted.
#[async_trait]
pub trait AutomationHook: Send + Sync {
    /// Consumes one lifecycle event.
    async fn publish(&self, event: &TaskEvent);
}
