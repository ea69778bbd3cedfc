//! The top-level novel document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chapter::Chapter;
use crate::character::Character;
use crate::image::NovelImage;
use crate::place::Place;
use crate::plan::PlanSection;
use crate::relationship::Relationship;
use crate::timeline::TimelineEvent;

/// A complete novel: manuscript plus story bible.
///
/// This is the unit the history manager snapshots (as part of the whole
/// novels list) and the persistence layer stores inside the library envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novel {
    /// Stable identifier, generated at creation.
    pub id: Uuid,

    /// Working title.
    pub title: String,

    /// Author name shown on exports.
    #[serde(default)]
    pub author: String,

    /// Back-cover synopsis.
    #[serde(default)]
    pub synopsis: String,

    /// Genre label (free text).
    #[serde(default)]
    pub genre: String,

    /// BCP 47-ish language code threaded through AI requests (e.g., "en").
    #[serde(default = "default_language")]
    pub language: String,

    /// When the novel was created (RFC 3339).
    pub created_at: String,

    /// When the novel content last changed (RFC 3339).
    ///
    /// Only bumped by effective mutations: an updater that leaves a
    /// collection deep-equal must not touch this field.
    pub updated_at: String,

    /// Manuscript chapters, in reading order.
    pub chapters: Vec<Chapter>,

    /// Character roster.
    #[serde(default)]
    pub characters: Vec<Character>,

    /// Places and settings.
    #[serde(default)]
    pub places: Vec<Place>,

    /// Attached images (covers, mood boards).
    #[serde(default)]
    pub images: Vec<NovelImage>,

    /// Timeline events, in story order.
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,

    /// Relationships between characters.
    #[serde(default)]
    pub relationships: Vec<Relationship>,

    /// Plan / outline sections.
    #[serde(default)]
    pub plan: Vec<PlanSection>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Novel {
    /// Create a new novel with a single empty first chapter.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author: String::new(),
            synopsis: String::new(),
            genre: String::new(),
            language: default_language(),
            created_at: now.clone(),
            updated_at: now,
            chapters: vec![Chapter::new("Chapter 1")],
            characters: Vec::new(),
            places: Vec::new(),
            images: Vec::new(),
            timeline: Vec::new(),
            relationships: Vec::new(),
            plan: Vec::new(),
        }
    }

    /// Refresh the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Parse the created_at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Parse the updated_at timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.updated_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Look up a chapter by id.
    pub fn chapter(&self, id: Uuid) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Look up a chapter by id, mutable.
    pub fn chapter_mut(&mut self, id: Uuid) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| c.id == id)
    }

    /// Id of the first chapter, if any.
    pub fn first_chapter_id(&self) -> Option<Uuid> {
        self.chapters.first().map(|c| c.id)
    }

    /// Concatenated plain text of the whole manuscript, chapter by chapter.
    ///
    /// Used by statistics and the AI extraction workflows, which operate on
    /// prose rather than on the editor payload.
    pub fn manuscript_text(&self) -> String {
        let mut out = String::new();
        for chapter in &self.chapters {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&crate::stats::plain_text(&chapter.content));
        }
        out
    }
}
