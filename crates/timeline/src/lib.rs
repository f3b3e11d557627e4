use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

mod clock;
pub use clock::*;
mod sequence;
pub use sequence::*;
mod store;
pub use store::*;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("clip not found: {0}")]
    ClipNotFound(ClipId),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ClipId(pub Uuid);

impl ClipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Image,
    Video,
}

/// One item in the edited sequence. Identity is the stable `id`, never the
/// current position; selection and gesture state hold ids and resolve them
/// to an index only when mutating.
#[derive(Debug, Clone)]
pub struct ClipEntry {
    pub id: ClipId,
    pub kind: ClipKind,
    pub display_name: String,
    /// Source handle for entries imported this session. Handles are not
    /// persisted; entries restored from a snapshot carry `None` and are
    /// metadata-only.
    pub media_ref: Option<PathBuf>,
}

impl ClipEntry {
    pub fn new(kind: ClipKind, display_name: impl Into<String>, media_ref: Option<PathBuf>) -> Self {
        Self {
            id: ClipId::new(),
            kind,
            display_name: display_name.into(),
            media_ref,
        }
    }

    /// Entry rebuilt from a persisted snapshot, without its source handle.
    pub fn restored(kind: ClipKind, display_name: impl Into<String>) -> Self {
        Self::new(kind, display_name, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ClipKind::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&ClipKind::Video).unwrap(), "\"video\"");
        let kind: ClipKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, ClipKind::Video);
    }

    #[test]
    fn restored_entries_have_no_media_ref() {
        let entry = ClipEntry::restored(ClipKind::Image, "beach.png");
        assert!(entry.media_ref.is_none());
        assert_eq!(entry.display_name, "beach.png");
    }
}
