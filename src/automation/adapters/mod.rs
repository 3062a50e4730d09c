//! Adapter implementations for automation ports.

pub mod memory;

pub use memory::{InMemoryMailbox, NullHook, RecordingHook};
