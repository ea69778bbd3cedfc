//! Plan / outline sections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One section of the novel plan (premise, act outline, beat sheet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSection {
    /// Stable identifier.
    pub id: Uuid,

    /// Section heading.
    pub heading: String,

    /// Section body text.
    #[serde(default)]
    pub content: String,
}

impl PlanSection {
    /// Create a section with a heading.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            heading: heading.into(),
            content: String::new(),
        }
    }
}
