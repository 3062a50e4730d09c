//! Adapter implementations for the task-engine ports.

pub mod memory;
