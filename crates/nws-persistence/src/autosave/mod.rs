//! Autosave coordination.
//!
//! Provides:
//! - `Autosave` - the save-status state machine with baseline change detection
//! - `AutosaveConfig` - user settings for autosave behavior

mod config;
mod coordinator;

pub use config::AutosaveConfig;
pub use coordinator::{Autosave, SaveOutcome, SaveStatus};
