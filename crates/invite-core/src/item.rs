//! Records shown by the invitation apps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored object as listed by the object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Full path inside the bucket, e.g. `originals/snap/10.jpg`.
    pub full_path: String,

    /// Final path segment, e.g. `10.jpg`.
    pub name: String,
}

impl ObjectRef {
    /// Build a reference from a full path. The name is the last segment.
    pub fn new(full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let name = full_path
            .rsplit('/')
            .next()
            .unwrap_or(full_path.as_str())
            .to_string();
        Self { full_path, name }
    }
}

/// A gallery photo with its resolved download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Object name the photo was listed under.
    pub name: String,

    /// Download URL for display.
    pub url: String,

    /// Numeric suffix of the file stem, used for ordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

/// A guestbook message as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestEntry {
    /// Document id assigned by the store.
    pub id: String,

    /// Author name.
    pub name: String,

    /// Message body.
    pub content: String,

    /// Server-side creation time.
    pub created_at: DateTime<Utc>,
}

/// A guestbook message being written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestEntryDraft {
    pub name: String,
    pub content: String,
}

impl GuestEntryDraft {
    /// Create a draft.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Whether both fields contain something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Return a trimmed copy, or `None` if either field is blank.
    pub fn validate(&self) -> Option<GuestEntryDraft> {
        if !self.is_complete() {
            return None;
        }
        Some(GuestEntryDraft {
            name: self.name.trim().to_string(),
            content: self.content.trim().to_string(),
        })
    }
}
