//! Authorization port.
//!
//! Authorization decisioning lives outside the engine. Every service
//! operation asks the authorizer before touching any other collaborator, so
//! a denial surfaces before validation or persistence work happens.

use crate::context::RequestContext;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Protected resource groups, derived from the owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Task records and their direct fields.
    Tasks,
    /// Threaded comments.
    TaskComments,
    /// Dependency edges.
    TaskDependencies,
    /// Attachment records and bytes.
    TaskAttachments,
    /// Organization-scoped tags.
    TaskTags,
}

impl Resource {
    /// Returns the canonical resource name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::TaskComments => "task_comments",
            Self::TaskDependencies => "task_dependencies",
            Self::TaskAttachments => "task_attachments",
            Self::TaskTags => "task_tags",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions a caller may attempt on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a record.
    Create,
    /// Read records.
    Read,
    /// Mutate an existing record.
    Update,
    /// Remove a record.
    Delete,
}

impl Action {
    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denial returned by the authorizer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("access denied: {action} on {resource}")]
pub struct AccessDenied {
    /// Resource the caller attempted to touch.
    pub resource: Resource,
    /// Action the caller attempted.
    pub action: Action,
}

impl AccessDenied {
    /// Returns the stable machine-readable key for this failure.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        "access.denied"
    }
}

/// Authorization decisioning contract.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Allows or denies an action for the calling context.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the caller may not perform the action.
    async fn authorize(
        &self,
        ctx: &RequestContext,
        resource: Resource,
        action: Action,
    ) -> Result<(), AccessDenied>;
}
