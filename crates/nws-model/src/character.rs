//! Character roster entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Narrative role of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterRole {
    Protagonist,
    Antagonist,
    #[default]
    Supporting,
    Minor,
}

impl CharacterRole {
    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Protagonist => "Protagonist",
            Self::Antagonist => "Antagonist",
            Self::Supporting => "Supporting",
            Self::Minor => "Minor",
        }
    }

    /// Parse a role from loosely formatted text (as returned by extraction).
    /// Unknown labels fall back to [`CharacterRole::Supporting`].
    pub fn parse_lenient(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "protagonist" | "main" | "lead" | "hero" | "heroine" => Self::Protagonist,
            "antagonist" | "villain" => Self::Antagonist,
            "minor" | "background" => Self::Minor,
            _ => Self::Supporting,
        }
    }
}

/// A character in the story bible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier.
    pub id: Uuid,

    /// Character name; treated as the merge key by extraction.
    pub name: String,

    /// Narrative role.
    #[serde(default)]
    pub role: CharacterRole,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Short trait labels ("stubborn", "left-handed").
    #[serde(default)]
    pub traits: Vec<String>,
}

impl Character {
    /// Create a character with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: CharacterRole::default(),
            description: String::new(),
            traits: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_roles() {
        assert_eq!(
            CharacterRole::parse_lenient("Villain"),
            CharacterRole::Antagonist
        );
        assert_eq!(
            CharacterRole::parse_lenient(" main "),
            CharacterRole::Protagonist
        );
        assert_eq!(
            CharacterRole::parse_lenient("sidekick"),
            CharacterRole::Supporting
        );
    }
}
