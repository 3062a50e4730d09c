//! Domain types for lifecycle automation.

mod events;

pub use events::{TaskEvent, TaskEventKind};
