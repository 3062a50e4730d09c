//! Aggregated persistence handle for the task engine.

use super::attachments::AttachmentRepository;
use super::comments::CommentRepository;
use super::dependencies::DependencyRepository;
use super::repository::TaskRepository;
use super::tags::TagRepository;
use std::sync::Arc;

/// The task store: every repository the engine persists through, bundled so
/// services can share one wiring point.
///
/// All members are trait objects; swap any of them independently (the test
/// suites use the in-memory adapters for all five).
#[derive(Clone)]
pub struct TaskStore {
    /// Task aggregate records.
    pub tasks: Arc<dyn TaskRepository>,
    /// Threaded comments.
    pub comments: Arc<dyn CommentRepository>,
    /// Dependency edges.
    pub dependencies: Arc<dyn DependencyRepository>,
    /// Organization-scoped tags.
    pub tags: Arc<dyn TagRepository>,
    /// Attachment records.
    pub attachments: Arc<dyn AttachmentRepository>,
}
