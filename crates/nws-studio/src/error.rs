//! Studio error types.

use thiserror::Error;
use uuid::Uuid;

use nws_ai::AiError;
use nws_persistence::PersistenceError;

/// Errors from studio operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudioError {
    /// An operation needed an active novel and none is selected.
    #[error("no novel is selected")]
    NoActiveNovel,

    /// An operation needed an active chapter and none is selected.
    #[error("no chapter is selected")]
    NoActiveChapter,

    /// A mutating operation reached a session that is not open.
    #[error("session is not open")]
    SessionClosed,

    /// A novel id did not resolve against the library.
    #[error("novel not found: {id}")]
    UnknownNovel { id: Uuid },

    /// A chapter id did not resolve against the active novel.
    #[error("chapter not found: {id}")]
    UnknownChapter { id: Uuid },

    /// Storage failed underneath the session.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The AI service failed or is not configured.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// Settings could not be written.
    #[error("settings error: {reason}")]
    Settings { reason: String },
}

impl StudioError {
    /// A message suitable for a dismissible notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoActiveNovel => "Select or create a novel first.".to_string(),
            Self::NoActiveChapter => "Select a chapter first.".to_string(),
            Self::SessionClosed => "The library is closed. Open it again first.".to_string(),
            Self::UnknownNovel { .. } => "That novel no longer exists.".to_string(),
            Self::UnknownChapter { .. } => "That chapter no longer exists.".to_string(),
            Self::Persistence(e) => e.user_message(),
            Self::Ai(e) => e.user_message(),
            Self::Settings { reason } => format!("Could not save settings: {reason}"),
        }
    }
}

/// Result type alias for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
