//! Directory ports for employee and project lookups.
//!
//! Employees and projects are owned by other parts of the backend; the
//! engine only needs existence checks and contact details for notification
//! fan-out.

use crate::task::domain::{EmployeeId, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Lookup-layer failure.
    #[error("directory lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}

/// Contact details for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeContact {
    /// Employee identifier.
    pub id: EmployeeId,
    /// Human-readable name used in notification bodies.
    pub display_name: String,
    /// Delivery address for notifications.
    pub email: String,
}

/// Employee directory contract.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Finds contact details for an employee. Returns `None` when unknown.
    async fn find(&self, id: EmployeeId) -> DirectoryResult<Option<EmployeeContact>>;

    /// Returns whether the employee exists.
    async fn exists(&self, id: EmployeeId) -> DirectoryResult<bool> {
        Ok(self.find(id).await?.is_some())
    }
}

/// Project directory contract.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Returns whether the project exists.
    async fn exists(&self, id: ProjectId) -> DirectoryResult<bool>;
}
