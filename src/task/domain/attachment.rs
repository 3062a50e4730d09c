//! Task attachment metadata.

use super::{AttachmentId, EmployeeId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque location of stored attachment bytes, issued by the file store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoragePath(String);

impl StoragePath {
    /// Wraps a path issued by a file store implementation.
    #[must_use]
    pub const fn new(path: String) -> Self {
        Self(path)
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who may see an attachment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentVisibility {
    /// Visible to everyone in the organization.
    #[default]
    Everyone,
    /// Visible to the task's assignees only.
    AssigneesOnly,
    /// Visible to the task owner only.
    OwnerOnly,
}

/// Parameter object for recording a stored attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachmentData {
    /// Owning task.
    pub task: TaskId,
    /// Original file name.
    pub file_name: String,
    /// Location issued by the file store.
    pub storage_path: StoragePath,
    /// Declared MIME type.
    pub content_type: String,
    /// Size of the stored bytes.
    pub size_bytes: u64,
    /// SHA-256 hex digest of the stored bytes.
    pub checksum_sha256: String,
    /// Visibility of the attachment.
    pub visibility: AttachmentVisibility,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Employee who uploaded the file.
    pub uploaded_by: EmployeeId,
}

/// Metadata for a file attached to a task.
///
/// The bytes themselves live behind the file-store port; this record keeps
/// the location, the declared content type, and an integrity digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAttachment {
    id: AttachmentId,
    task: TaskId,
    file_name: String,
    storage_path: StoragePath,
    content_type: String,
    size_bytes: u64,
    checksum_sha256: String,
    visibility: AttachmentVisibility,
    description: Option<String>,
    uploaded_by: EmployeeId,
    created_at: DateTime<Utc>,
}

impl TaskAttachment {
    /// Records an attachment whose bytes have already been stored.
    #[must_use]
    pub fn new(data: NewAttachmentData, clock: &impl Clock) -> Self {
        Self {
            id: AttachmentId::new(),
            task: data.task,
            file_name: data.file_name,
            storage_path: data.storage_path,
            content_type: data.content_type,
            size_bytes: data.size_bytes,
            checksum_sha256: data.checksum_sha256,
            visibility: data.visibility,
            description: data.description,
            uploaded_by: data.uploaded_by,
            created_at: clock.utc(),
        }
    }

    /// Computes the SHA-256 hex digest of attachment bytes.
    #[must_use]
    pub fn digest(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the file-store location of the bytes.
    #[must_use]
    pub const fn storage_path(&self) -> &StoragePath {
        &self.storage_path
    }

    /// Returns the declared MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the stored size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the SHA-256 hex digest recorded at upload time.
    #[must_use]
    pub fn checksum_sha256(&self) -> &str {
        &self.checksum_sha256
    }

    /// Returns the attachment visibility.
    #[must_use]
    pub const fn visibility(&self) -> AttachmentVisibility {
        self.visibility
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the uploading employee.
    #[must_use]
    pub const fn uploaded_by(&self) -> EmployeeId {
        self.uploaded_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
