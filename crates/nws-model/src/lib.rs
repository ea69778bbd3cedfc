//! Document model types for Novel Writing Studio.
//!
//! A library is a list of [`Novel`] values. Each novel owns its manuscript
//! (chapters) together with the story-bible collections the feature panels
//! edit: characters, places, images, timeline events, relationships, and the
//! plan. Every type here is plain serializable data with derived structural
//! equality: the undo/redo and autosave layers rely on `PartialEq` to detect
//! "nothing actually changed".
//!
//! # Module Organization
//!
//! - [`novel`]: the top-level document and its metadata
//! - [`chapter`]: manuscript chapters
//! - [`character`], [`place`], [`image`]: story-bible entities
//! - [`timeline`], [`relationship`], [`plan`]: narrative structure entities
//! - [`stats`]: manuscript statistics (word counts, reading time)

pub mod chapter;
pub mod character;
pub mod image;
pub mod novel;
pub mod place;
pub mod plan;
pub mod relationship;
pub mod stats;
pub mod timeline;

pub use chapter::Chapter;
pub use character::{Character, CharacterRole};
pub use image::NovelImage;
pub use novel::Novel;
pub use place::Place;
pub use plan::PlanSection;
pub use relationship::Relationship;
pub use stats::{ChapterStats, ManuscriptStats, plain_text, word_count};
pub use timeline::TimelineEvent;
