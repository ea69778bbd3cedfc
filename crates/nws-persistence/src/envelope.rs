//! The persisted library envelope.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nws_model::Novel;

use crate::error::{PersistenceError, Result};

/// Current envelope schema version. Bump when the shape changes.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The single fixed key the whole library lives under.
pub const LIBRARY_KEY: &str = "novel-writing-studio.library";

/// Everything the studio persists, as one whole-value JSON document.
///
/// Ownership: routine writes go through the autosave coordinator; backup
/// import/export writes out-of-band. Read once at startup to hydrate the
/// history manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEnvelope {
    /// Schema version (for future migrations).
    #[serde(default = "first_schema_version")]
    pub schema_version: u32,

    /// When the envelope was last written (RFC 3339).
    #[serde(default)]
    pub saved_at: String,

    /// All novels in the library.
    pub novels: Vec<Novel>,

    /// The novel that was open when the envelope was written.
    #[serde(default)]
    pub active_novel_id: Option<Uuid>,

    /// Last-open chapter per novel.
    #[serde(default)]
    pub active_chapter_ids: BTreeMap<Uuid, Uuid>,
}

fn first_schema_version() -> u32 {
    1
}

impl LibraryEnvelope {
    /// Create an envelope around the given library state.
    pub fn new(
        novels: Vec<Novel>,
        active_novel_id: Option<Uuid>,
        active_chapter_ids: BTreeMap<Uuid, Uuid>,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            novels,
            active_novel_id,
            active_chapter_ids,
        }
    }

    /// An empty first-run library.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None, BTreeMap::new())
    }

    /// Update the saved-at timestamp.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now().to_rfc3339();
    }

    /// Parse the saved_at timestamp.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Check the schema version against what this build understands.
    pub fn check_version(&self) -> Result<()> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.schema_version,
                max_supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Reject structurally broken envelopes (duplicate novel ids).
    pub fn check_integrity(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for novel in &self.novels {
            if !seen.insert(novel.id) {
                return Err(PersistenceError::InvalidBackup {
                    reason: format!("duplicate novel id {}", novel.id),
                });
            }
        }
        Ok(())
    }

    /// Drop selection entries that no longer reference contained novels and
    /// chapters. Dangling ids are silently discarded; they are remembered
    /// conveniences, not document content.
    pub fn prune_selection(&mut self) {
        self.active_chapter_ids.retain(|novel_id, chapter_id| {
            self.novels
                .iter()
                .find(|n| n.id == *novel_id)
                .is_some_and(|n| n.chapter(*chapter_id).is_some())
        });
        if let Some(active) = self.active_novel_id {
            if !self.novels.iter().any(|n| n.id == active) {
                self.active_novel_id = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let novel = Novel::new("Draft");
        let chapter_id = novel.first_chapter_id().unwrap();
        let mut chapters = BTreeMap::new();
        chapters.insert(novel.id, chapter_id);
        let envelope = LibraryEnvelope::new(vec![novel.clone()], Some(novel.id), chapters);

        let json = serde_json::to_string(&envelope).unwrap();
        let parsed: LibraryEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, envelope);
        assert_eq!(parsed.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_first_generation_envelope_loads() {
        // No schema_version, saved_at, or selection fields.
        let json = r#"{"novels": []}"#;
        let envelope: LibraryEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.schema_version, 1);
        assert!(envelope.saved_at.is_empty());
        assert_eq!(envelope.active_novel_id, None);
    }

    #[test]
    fn test_check_version_rejects_future() {
        let mut envelope = LibraryEnvelope::empty();
        envelope.schema_version = CURRENT_SCHEMA_VERSION + 1;
        assert!(matches!(
            envelope.check_version(),
            Err(PersistenceError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_check_integrity_rejects_duplicate_ids() {
        let novel = Novel::new("One");
        let duplicate = novel.clone();
        let envelope = LibraryEnvelope::new(vec![novel, duplicate], None, BTreeMap::new());
        assert!(matches!(
            envelope.check_integrity(),
            Err(PersistenceError::InvalidBackup { .. })
        ));
    }

    #[test]
    fn test_prune_selection_drops_dangling_ids() {
        let kept = Novel::new("Kept");
        let gone = Novel::new("Gone");
        let mut chapters = BTreeMap::new();
        chapters.insert(kept.id, kept.first_chapter_id().unwrap());
        chapters.insert(gone.id, gone.first_chapter_id().unwrap());
        // Also remember a chapter that is not in the kept novel.
        chapters.insert(kept.id, gone.first_chapter_id().unwrap());

        let mut envelope = LibraryEnvelope::new(vec![kept.clone()], Some(gone.id), chapters);
        envelope.prune_selection();

        assert_eq!(envelope.active_novel_id, None);
        assert!(envelope.active_chapter_ids.is_empty());
    }
}
