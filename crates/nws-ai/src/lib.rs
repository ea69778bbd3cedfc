//! AI completion service for Novel Writing Studio.
//!
//! One capability set (prose assistance: enhance, continue, proofread,
//! synonyms; structured extraction: characters, places, timeline,
//! relationships; narrative analysis) served by three conforming
//! backend implementations selected by configuration at startup. A backend
//! that does not offer a capability reports an explicit unsupported error
//! rather than silently returning empty data.
//!
//! Every operation takes plain text plus a language code. Failures map onto
//! [`AiError`], which carries a user-facing message: callers surface AI
//! failures as notifications, and the document is only touched after a
//! successful response.
//!
//! # Module Organization
//!
//! - [`service`]: the [`AiService`] facade
//! - [`capability`]: the provider trait and capability names
//! - [`providers`]: the three HTTP backends
//! - [`prompt`]: prompt templates, one builder per capability
//! - [`parse`]: lenient reply parsing (fence stripping, JSON recovery)
//! - [`dto`]: typed payloads for structured operations
//! - [`settings`]: provider selection and credentials

pub mod capability;
pub mod dto;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod providers;
pub mod service;
pub mod settings;

pub use capability::{Capability, CompletionProvider};
pub use dto::{
    CharacterSketch, NarrativeReport, NarrativeScores, PlaceSketch, RelationshipSketch,
    TimelineSketch,
};
pub use error::{AiError, Result};
pub use providers::{ClaudeProvider, GeminiProvider, OpenAiProvider};
pub use service::AiService;
pub use settings::{AiSettings, ProviderKind};
