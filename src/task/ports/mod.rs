//! Port contracts for the task engine.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! persistence, authorization decisioning, directory lookups, file storage,
//! and rule validation.

pub mod access;
pub mod attachments;
pub mod comments;
pub mod dependencies;
pub mod directory;
pub mod files;
pub mod repository;
pub mod store;
pub mod tags;
pub mod validator;

pub use access::{AccessDenied, Action, Authorizer, Resource};
pub use attachments::AttachmentRepository;
pub use comments::CommentRepository;
pub use dependencies::DependencyRepository;
pub use directory::{DirectoryError, DirectoryResult, EmployeeContact, EmployeeDirectory, ProjectDirectory};
pub use files::{FileStore, FileStoreError, FileStoreResult};
pub use repository::{EntityKind, RepositoryError, RepositoryResult, TaskQuery, TaskRepository};
pub use store::TaskStore;
pub use tags::TagRepository;
pub use validator::{TaskValidator, ValidationLimits, ValidationResult};
