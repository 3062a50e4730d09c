//! Foreman: task lifecycle and dependency engine.
//!
//! This crate provides the core of an enterprise work-management backend:
//! hierarchical tasks moved through a validated state machine, a directed
//! dependency graph between tasks, threaded comments, progress roll-up from
//! subtasks, and the notification automation triggered by every mutation.
//!
//! # Architecture
//!
//! Foreman follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory reference
//!   implementations ship with the crate)
//!
//! Persistence, authorization decisioning, notification delivery, file
//! storage, and the employee directory are consumed strictly through ports;
//! the engine never binds to a concrete backend.
//!
//! # Modules
//!
//! - [`task`]: the Task aggregate, its validators, and the lifecycle,
//!   dependency-graph, comment-thread, and progress services
//! - [`automation`]: lifecycle events and notification composition
//! - [`context`]: explicit per-request caller identity

pub mod automation;
pub mod context;
pub mod task;
