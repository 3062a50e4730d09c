//! Repository port for organization-scoped task tags.

use super::repository::RepositoryResult;
use crate::task::domain::{OrganizationId, TagId, TaskTag};
use async_trait::async_trait;

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the tag id already
    /// exists.
    async fn store(&self, tag: &TaskTag) -> RepositoryResult<()>;

    /// Finds a tag by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TagId) -> RepositoryResult<Option<TaskTag>>;

    /// Returns whether a tag with the given identifier exists.
    async fn exists(&self, id: TagId) -> RepositoryResult<bool>;

    /// Returns every tag owned by the organization.
    async fn find_by_organization(
        &self,
        organization: OrganizationId,
    ) -> RepositoryResult<Vec<TaskTag>>;
}
