//! Identifier newtypes for the task domain.
//!
//! Every entity gets its own UUID-backed identifier so ids of different
//! entities cannot be mixed up at compile time. All identifiers serialise
//! transparently as plain UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a task record.
    TaskId
}

entity_id! {
    /// Unique identifier for an employee, owned by the external directory.
    EmployeeId
}

entity_id! {
    /// Unique identifier for an organization (tenant scope).
    OrganizationId
}

entity_id! {
    /// Unique identifier for a project, owned by the external directory.
    ProjectId
}

entity_id! {
    /// Unique identifier for a task comment.
    CommentId
}

entity_id! {
    /// Unique identifier for a dependency edge between two tasks.
    DependencyId
}

entity_id! {
    /// Unique identifier for an organization-scoped task tag.
    TagId
}

entity_id! {
    /// Unique identifier for a task attachment record.
    AttachmentId
}
