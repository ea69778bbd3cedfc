//! Persistence for Novel Writing Studio libraries.
//!
//! The whole library is stored as one JSON envelope under one fixed key in a
//! [`KeyValueStore`]. Routine writes flow through the [`Autosave`]
//! coordinator, which tracks the value against the last persisted snapshot
//! and owns the save-status state machine; backup import/export writes
//! out-of-band through the [`backup`] module.
//!
//! # Module Organization
//!
//! - [`store`]: the key-value store contract plus file-backed and in-memory
//!   implementations
//! - [`envelope`]: the persisted library envelope (versioned, validated)
//! - [`library`]: typed access to the envelope under its fixed key
//! - [`autosave`]: the autosave coordinator and its configuration
//! - [`backup`]: explicit import/export of the envelope as pretty JSON
//! - [`error`]: structured errors with user-facing messages

pub mod autosave;
pub mod backup;
pub mod envelope;
pub mod error;
pub mod library;
pub mod store;

pub use autosave::{Autosave, AutosaveConfig, SaveOutcome, SaveStatus};
pub use envelope::{CURRENT_SCHEMA_VERSION, LIBRARY_KEY, LibraryEnvelope};
pub use error::{PersistenceError, Result};
pub use library::LibraryStore;
pub use store::{FileStore, KeyValueStore, MemoryStore};
