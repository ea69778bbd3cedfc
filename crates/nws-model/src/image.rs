//! Attached images.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image attached to a novel (cover art, mood board material).
///
/// The pixel data is an opaque encoded payload produced by the host surface;
/// this crate never decodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelImage {
    /// Stable identifier.
    pub id: Uuid,

    /// Caption shown under the image.
    #[serde(default)]
    pub caption: String,

    /// Encoded image payload (data URL or similar).
    pub data: String,
}

impl NovelImage {
    /// Create an image from an encoded payload.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            caption: String::new(),
            data: data.into(),
        }
    }
}
