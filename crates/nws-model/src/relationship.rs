//! Relationships between characters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed relationship between two characters.
///
/// Endpoints are character *names*, not ids: the extraction service returns
/// names, and the relationship panel tolerates characters that do not (yet)
/// exist in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Stable identifier.
    pub id: Uuid,

    /// Name of the character the relationship originates from.
    pub source: String,

    /// Name of the character the relationship points at.
    pub target: String,

    /// Relationship kind ("mentor", "rival", "sibling").
    pub kind: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Relationship {
    /// Create a relationship between two named characters.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            target: target.into(),
            kind: kind.into(),
            description: String::new(),
        }
    }
}
