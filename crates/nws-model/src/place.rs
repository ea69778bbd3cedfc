//! Places and settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A location in the story bible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable identifier.
    pub id: Uuid,

    /// Place name; treated as the merge key by extraction.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Why the place matters to the story.
    #[serde(default)]
    pub significance: String,
}

impl Place {
    /// Create a place with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            significance: String::new(),
        }
    }
}
