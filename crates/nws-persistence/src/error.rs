//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints. The autosave
//! coordinator converts these into a status, never a crash.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize library data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize library data")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored envelope was written by a newer application version.
    #[error("Library version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// Backup payload failed validation.
    #[error("Invalid backup: {reason}")]
    InvalidBackup { reason: String },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the library data.".to_string()
            }
            Self::Deserialization { .. } => {
                "An error occurred while reading the library data. The file may be corrupted."
                    .to_string()
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
            } => {
                format!(
                    "This library was created with a newer version of Novel Writing Studio \
                    (library version {}, your version supports up to {}). \
                    Please update the application.",
                    found, max_supported
                )
            }
            Self::InvalidBackup { reason } => {
                format!("The backup file is not valid: {reason}")
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => Some("Try restoring from a backup if you have one.".into()),
            Self::UnsupportedVersion { .. } => {
                Some("Download the latest version of Novel Writing Studio.".into())
            }
            Self::InvalidBackup { .. } => {
                Some("Make sure you selected a backup exported by Novel Writing Studio.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
