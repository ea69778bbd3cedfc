//! Typed payloads for structured AI operations.
//!
//! Extraction prompts demand a bare JSON payload in exactly these shapes;
//! parsing is lenient about extra fields (providers love to add them) but
//! strict about the ones named here. The studio layer merges sketches into
//! the document model, minting ids on the way in; providers never see or
//! produce ids.

use serde::{Deserialize, Serialize};

/// A character found in the manuscript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSketch {
    /// Character name (the merge key).
    pub name: String,

    /// Loose role label ("protagonist", "villain"); mapped leniently onto
    /// the model's role enum by the caller.
    #[serde(default)]
    pub role: String,

    /// Short description.
    #[serde(default)]
    pub description: String,

    /// Trait labels.
    #[serde(default)]
    pub traits: Vec<String>,
}

/// A place found in the manuscript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSketch {
    /// Place name (the merge key).
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub significance: String,
}

/// A story event found in the manuscript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSketch {
    /// Short event title.
    pub title: String,

    /// When the event happens, as display text.
    #[serde(default)]
    pub moment: String,

    #[serde(default)]
    pub description: String,
}

/// A relationship between two named characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSketch {
    /// Name of the character the relationship originates from.
    pub source: String,

    /// Name of the character the relationship points at.
    pub target: String,

    /// Relationship kind ("mentor", "rival", "sibling").
    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,
}

/// Scores on a 0–10 scale, one per narrative axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NarrativeScores {
    pub pacing: f32,
    pub dialogue: f32,
    pub description: f32,
    pub character_development: f32,
    pub plot_coherence: f32,
}

/// Multi-axis narrative analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    /// Axis scores.
    #[serde(default)]
    pub scores: NarrativeScores,

    /// One-paragraph overall assessment.
    #[serde(default)]
    pub summary: String,

    /// What the manuscript does well.
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Concrete suggestions for improvement.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketches_tolerate_missing_optional_fields() {
        let sketch: CharacterSketch = serde_json::from_str(r#"{"name": "Mira"}"#).unwrap();
        assert_eq!(sketch.name, "Mira");
        assert!(sketch.role.is_empty());
        assert!(sketch.traits.is_empty());

        let event: TimelineSketch = serde_json::from_str(r#"{"title": "The storm"}"#).unwrap();
        assert!(event.moment.is_empty());
    }

    #[test]
    fn test_sketches_require_merge_keys() {
        assert!(serde_json::from_str::<CharacterSketch>(r#"{"role": "hero"}"#).is_err());
        assert!(serde_json::from_str::<RelationshipSketch>(r#"{"source": "Mira"}"#).is_err());
    }

    #[test]
    fn test_report_defaults_when_axes_missing() {
        let report: NarrativeReport =
            serde_json::from_str(r#"{"summary": "Tight opening."}"#).unwrap();
        assert_eq!(report.scores.pacing, 0.0);
        assert_eq!(report.summary, "Tight opening.");
    }
}
