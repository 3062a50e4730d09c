//! Lifecycle automation for the task engine.
//!
//! Task services publish [`domain::TaskEvent`] values through the
//! [`ports::AutomationHook`] port strictly after the originating state
//! change has been persisted. The shipped hook implementation composes
//! notifications from templates and delivers them through the mailer port;
//! its failures are logged and swallowed so delivery problems can never
//! roll back task state. The module follows hexagonal architecture:
//!
//! - Event vocabulary in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Notification composition in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
