//! Port contracts for lifecycle automation.

pub mod hook;
pub mod mailer;

pub use hook::AutomationHook;
pub use mailer::{EmailMessage, Mailer, MailerError};
