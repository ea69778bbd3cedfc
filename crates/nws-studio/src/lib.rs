//! Composition root for Novel Writing Studio.
//!
//! A [`StudioSession`] wires the pieces together: the library store
//! (persistence), the undo/redo history over the novels list, the active
//! selection, the autosave coordinator, and the notification queue. Feature
//! surfaces talk to the session through narrow collection-scoped updaters
//! and never see the full document shape.
//!
//! # Module Organization
//!
//! - [`session`]: the session and the document mutation layer
//! - [`assist`]: AI-assisted workflows (merge-on-success only)
//! - [`selection`]: the active novel/chapter selection
//! - [`export`]: manuscript rendering (Markdown, plain text)
//! - [`notify`]: the bounded notification queue
//! - [`settings`]: persisted user preferences (TOML)
//! - [`error`]: studio error types

pub mod assist;
pub mod error;
pub mod export;
pub mod notify;
pub mod selection;
pub mod session;
pub mod settings;

pub use error::{Result, StudioError};
pub use export::{ManuscriptFormat, render_manuscript};
pub use notify::{Notification, Notifier, NotifyLevel};
pub use selection::Selection;
pub use session::StudioSession;
pub use settings::StudioSettings;
