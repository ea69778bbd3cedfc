//! Manuscript chapters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chapter of the manuscript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable identifier.
    pub id: Uuid,

    /// Chapter title.
    pub title: String,

    /// Serialized editor payload. Opaque to this crate: the editing surface
    /// owns the markup; statistics strip it before counting.
    #[serde(default)]
    pub content: String,

    /// Author notes, never part of the exported manuscript.
    #[serde(default)]
    pub notes: String,
}

impl Chapter {
    /// Create an empty chapter.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            notes: String::new(),
        }
    }

    /// Word count of the chapter prose.
    pub fn word_count(&self) -> usize {
        crate::stats::word_count(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chapter_is_empty() {
        let chapter = Chapter::new("Opening");
        assert_eq!(chapter.title, "Opening");
        assert!(chapter.content.is_empty());
        assert_eq!(chapter.word_count(), 0);
    }
}
