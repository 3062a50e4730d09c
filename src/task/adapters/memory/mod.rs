//! In-memory adapters for every task-engine port.
//!
//! These double as the reference implementations and as the substrate for
//! the test suites. All repositories are `Arc<RwLock<_>>`-backed and safe to
//! clone across threads.

mod access;
mod attachments;
mod comments;
mod dependencies;
mod directory;
mod files;
mod tags;
mod task;

pub use access::{AllowAllAuthorizer, DenyAllAuthorizer};
pub use attachments::InMemoryAttachmentRepository;
pub use comments::InMemoryCommentRepository;
pub use dependencies::InMemoryDependencyRepository;
pub use directory::InMemoryDirectory;
pub use files::InMemoryFileStore;
pub use tags::InMemoryTagRepository;
pub use task::InMemoryTaskRepository;

use crate::task::ports::RepositoryError;

/// Maps a poisoned-lock failure onto the shared repository error.
fn poisoned(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::storage(std::io::Error::other(err.to_string()))
}
