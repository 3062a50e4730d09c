//! Application services for the task engine.
//!
//! The lifecycle service orchestrates every mutation; the dependency,
//! comment, and progress services manage their own slices and are composed
//! by (or alongside) the orchestrator.

mod comments;
mod dependencies;
mod lifecycle;
mod progress;

pub use comments::{CommentThreadError, CommentThreadService};
pub use dependencies::{DependencyGraphError, DependencyGraphService};
pub use lifecycle::{
    AttachmentUpload, NewTaskRequest, TaskEngineWiring, TaskLifecycleError, TaskLifecycleService,
    TaskPatch,
};
pub use progress::{ProgressError, ProgressService};
