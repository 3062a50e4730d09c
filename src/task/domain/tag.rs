//! Organization-scoped task tags.

use super::{OrganizationId, TagId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A reusable, organization-scoped label that tasks reference by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTag {
    id: TagId,
    organization: OrganizationId,
    name: String,
    colour: String,
    created_at: DateTime<Utc>,
}

impl TaskTag {
    /// Creates a tag scoped to an organization.
    #[must_use]
    pub fn new(
        organization: OrganizationId,
        name: String,
        colour: String,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TagId::new(),
            organization,
            name,
            colour,
            created_at: clock.utc(),
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization(&self) -> OrganizationId {
        self.organization
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display colour.
    #[must_use]
    pub fn colour(&self) -> &str {
        &self.colour
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
