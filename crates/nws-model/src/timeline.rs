//! Timeline events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One event on the story timeline.
///
/// Events keep their list order; `moment` is display text ("three days
/// later", "Summer 1923"), not a parsed date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Stable identifier.
    pub id: Uuid,

    /// Short event title.
    pub title: String,

    /// When the event happens, as display text.
    #[serde(default)]
    pub moment: String,

    /// What happens.
    #[serde(default)]
    pub description: String,
}

impl TimelineEvent {
    /// Create an event with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            moment: String::new(),
            description: String::new(),
        }
    }
}
