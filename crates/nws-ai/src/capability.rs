//! The completion provider contract.
//!
//! One capability set, three conforming backend implementations. Every
//! method defaults to an explicit [`AiError::Unsupported`] result, so a
//! backend that does not serve a capability reports that fact instead of
//! silently returning empty data, so the contract stays testable.

use async_trait::async_trait;

use crate::dto::{
    CharacterSketch, NarrativeReport, PlaceSketch, RelationshipSketch, TimelineSketch,
};
use crate::error::{AiError, Result};
use crate::settings::ProviderKind;

/// Named capabilities of the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Enhance,
    ContinueStory,
    Proofread,
    Synonyms,
    ExtractCharacters,
    ExtractPlaces,
    ExtractTimeline,
    ExtractRelationships,
    AnalyzeNarrative,
}

impl Capability {
    /// Human-readable name for error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Enhance => "text enhancement",
            Self::ContinueStory => "story continuation",
            Self::Proofread => "proofreading",
            Self::Synonyms => "synonym lookup",
            Self::ExtractCharacters => "character extraction",
            Self::ExtractPlaces => "place extraction",
            Self::ExtractTimeline => "timeline extraction",
            Self::ExtractRelationships => "relationship extraction",
            Self::AnalyzeNarrative => "narrative analysis",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn unsupported<T>(provider: ProviderKind, capability: Capability) -> Result<T> {
    Err(AiError::Unsupported {
        provider,
        capability,
    })
}

/// An AI backend serving writing-assistance requests.
///
/// All operations take plain text plus a language code and return either
/// plain text or a typed payload. Implementations override what they
/// support; everything else reports [`AiError::Unsupported`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Which backend this is (used in error messages and logs).
    fn kind(&self) -> ProviderKind;

    /// Polish the prose without changing its meaning.
    async fn enhance(&self, _text: &str, _language: &str) -> Result<String> {
        unsupported(self.kind(), Capability::Enhance)
    }

    /// Continue the story from where the text leaves off.
    async fn continue_story(&self, _text: &str, _language: &str) -> Result<String> {
        unsupported(self.kind(), Capability::ContinueStory)
    }

    /// Correct spelling, grammar, and punctuation only.
    async fn proofread(&self, _text: &str, _language: &str) -> Result<String> {
        unsupported(self.kind(), Capability::Proofread)
    }

    /// Synonyms for a single word or short phrase.
    async fn synonyms(&self, _word: &str, _language: &str) -> Result<Vec<String>> {
        unsupported(self.kind(), Capability::Synonyms)
    }

    /// Characters mentioned in the text.
    async fn extract_characters(
        &self,
        _text: &str,
        _language: &str,
    ) -> Result<Vec<CharacterSketch>> {
        unsupported(self.kind(), Capability::ExtractCharacters)
    }

    /// Places and settings mentioned in the text.
    async fn extract_places(&self, _text: &str, _language: &str) -> Result<Vec<PlaceSketch>> {
        unsupported(self.kind(), Capability::ExtractPlaces)
    }

    /// Story events in narrative order.
    async fn extract_timeline(
        &self,
        _text: &str,
        _language: &str,
    ) -> Result<Vec<TimelineSketch>> {
        unsupported(self.kind(), Capability::ExtractTimeline)
    }

    /// Relationships between characters named in the text.
    async fn extract_relationships(
        &self,
        _text: &str,
        _language: &str,
    ) -> Result<Vec<RelationshipSketch>> {
        unsupported(self.kind(), Capability::ExtractRelationships)
    }

    /// Multi-axis narrative quality report.
    async fn analyze_narrative(&self, _text: &str, _language: &str) -> Result<NarrativeReport> {
        unsupported(self.kind(), Capability::AnalyzeNarrative)
    }
}
