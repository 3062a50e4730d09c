//! Explicit request context for caller identity.
//!
//! Every service operation receives a [`RequestContext`] naming the acting
//! employee and the organization scope of the call. Caller identity is never
//! read from ambient state; transports construct the context at the boundary
//! and thread it through explicitly.

use crate::task::domain::{EmployeeId, OrganizationId};
use serde::{Deserialize, Serialize};

/// Identity and tenant scope of the caller issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    employee: EmployeeId,
    organization: OrganizationId,
}

impl RequestContext {
    /// Creates a request context for the given caller and organization.
    #[must_use]
    pub const fn new(employee: EmployeeId, organization: OrganizationId) -> Self {
        Self {
            employee,
            organization,
        }
    }

    /// Returns the acting employee.
    #[must_use]
    pub const fn employee(&self) -> EmployeeId {
        self.employee
    }

    /// Returns the organization scope of the request.
    #[must_use]
    pub const fn organization(&self) -> OrganizationId {
        self.organization
    }
}
