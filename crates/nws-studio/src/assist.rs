//! AI-assisted workflows over the session.
//!
//! Every workflow follows the same contract: it requires the relevant
//! active selection, calls the AI service, and merges the result into the
//! document only after a successful response. A failure becomes a
//! notification and leaves document state untouched; the history/autosave
//! core never depends on these calls succeeding.

use nws_ai::{
    AiService, CharacterSketch, NarrativeReport, PlaceSketch, RelationshipSketch, TimelineSketch,
};
use nws_model::{Character, CharacterRole, Place, Relationship, TimelineEvent};
use nws_persistence::KeyValueStore;

use crate::error::{Result, StudioError};
use crate::session::StudioSession;

impl<S: KeyValueStore> StudioSession<S> {
    fn notify_failure(&mut self, what: &str, error: &StudioError) {
        tracing::warn!(%what, error = %error, "AI workflow failed");
        self.notifier_mut().error(error.user_message());
    }

    fn active_chapter_prose(&self) -> Result<(String, String)> {
        let novel = self.active_novel().ok_or(StudioError::NoActiveNovel)?;
        let language = novel.language.clone();
        let chapter = self.active_chapter().ok_or(StudioError::NoActiveChapter)?;
        Ok((chapter.content.clone(), language))
    }

    fn active_manuscript(&self) -> Result<(String, String)> {
        let novel = self.active_novel().ok_or(StudioError::NoActiveNovel)?;
        Ok((novel.manuscript_text(), novel.language.clone()))
    }

    /// Continue the active chapter; the continuation is appended to its
    /// content.
    pub async fn continue_active_chapter(&mut self, ai: &AiService) -> Result<()> {
        let (content, language) = self.active_chapter_prose()?;
        match ai.continue_story(&content, &language).await {
            Ok(continuation) => {
                let chapter_id = self
                    .selection()
                    .active_chapter_id()
                    .ok_or(StudioError::NoActiveChapter)?;
                self.update_chapters(|chapters| {
                    chapters
                        .iter()
                        .map(|c| {
                            if c.id == chapter_id {
                                let mut edited = c.clone();
                                if !edited.content.is_empty() {
                                    edited.content.push_str("\n\n");
                                }
                                edited.content.push_str(&continuation);
                                edited
                            } else {
                                c.clone()
                            }
                        })
                        .collect()
                });
                self.notifier_mut().success("Continuation added.");
                Ok(())
            }
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("continue", &error);
                Err(error)
            }
        }
    }

    /// Proofread the active chapter; its content is replaced with the
    /// corrected text.
    pub async fn proofread_active_chapter(&mut self, ai: &AiService) -> Result<()> {
        let (content, language) = self.active_chapter_prose()?;
        match ai.proofread(&content, &language).await {
            Ok(corrected) => {
                self.set_active_chapter_content(corrected);
                self.notifier_mut().success("Chapter proofread.");
                Ok(())
            }
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("proofread", &error);
                Err(error)
            }
        }
    }

    /// Polish a text fragment. Returns the improved text for the caller to
    /// merge; the document is not touched.
    pub async fn enhance_text(&mut self, ai: &AiService, text: &str) -> Result<String> {
        let language = self
            .active_novel()
            .map(|n| n.language.clone())
            .unwrap_or_else(|| "en".to_string());
        match ai.enhance(text, &language).await {
            Ok(improved) => Ok(improved),
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("enhance", &error);
                Err(error)
            }
        }
    }

    /// Synonyms for a word or short phrase.
    pub async fn synonyms_for(&mut self, ai: &AiService, word: &str) -> Result<Vec<String>> {
        let language = self
            .active_novel()
            .map(|n| n.language.clone())
            .unwrap_or_else(|| "en".to_string());
        match ai.synonyms(word, &language).await {
            Ok(words) => Ok(words),
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("synonyms", &error);
                Err(error)
            }
        }
    }

    /// Extract characters from the active novel's manuscript and merge new
    /// ones into its roster. Returns how many were added.
    pub async fn extract_characters_into_novel(&mut self, ai: &AiService) -> Result<usize> {
        let (prose, language) = self.active_manuscript()?;
        match ai.extract_characters(&prose, &language).await {
            Ok(sketches) => {
                let mut added = 0;
                self.update_characters(|existing| {
                    let mut next = existing.to_vec();
                    for sketch in &sketches {
                        if !next.iter().any(|c| name_matches(&c.name, &sketch.name)) {
                            next.push(character_from_sketch(sketch));
                            added += 1;
                        }
                    }
                    next
                });
                self.notifier_mut()
                    .success(format!("Found {added} new characters."));
                Ok(added)
            }
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("extract characters", &error);
                Err(error)
            }
        }
    }

    /// Extract places from the active novel's manuscript and merge new ones.
    pub async fn extract_places_into_novel(&mut self, ai: &AiService) -> Result<usize> {
        let (prose, language) = self.active_manuscript()?;
        match ai.extract_places(&prose, &language).await {
            Ok(sketches) => {
                let mut added = 0;
                self.update_places(|existing| {
                    let mut next = existing.to_vec();
                    for sketch in &sketches {
                        if !next.iter().any(|p| name_matches(&p.name, &sketch.name)) {
                            next.push(place_from_sketch(sketch));
                            added += 1;
                        }
                    }
                    next
                });
                self.notifier_mut()
                    .success(format!("Found {added} new places."));
                Ok(added)
            }
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("extract places", &error);
                Err(error)
            }
        }
    }

    /// Extract timeline events from the active novel's manuscript and append
    /// ones not already present (by title), preserving story order.
    pub async fn extract_timeline_into_novel(&mut self, ai: &AiService) -> Result<usize> {
        let (prose, language) = self.active_manuscript()?;
        match ai.extract_timeline(&prose, &language).await {
            Ok(sketches) => {
                let mut added = 0;
                self.update_timeline(|existing| {
                    let mut next = existing.to_vec();
                    for sketch in &sketches {
                        if !next.iter().any(|e| name_matches(&e.title, &sketch.title)) {
                            next.push(event_from_sketch(sketch));
                            added += 1;
                        }
                    }
                    next
                });
                self.notifier_mut()
                    .success(format!("Found {added} new timeline events."));
                Ok(added)
            }
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("extract timeline", &error);
                Err(error)
            }
        }
    }

    /// Extract character relationships from the active novel's manuscript
    /// and merge new ones (keyed on source, target, and kind).
    pub async fn extract_relationships_into_novel(&mut self, ai: &AiService) -> Result<usize> {
        let (prose, language) = self.active_manuscript()?;
        match ai.extract_relationships(&prose, &language).await {
            Ok(sketches) => {
                let mut added = 0;
                self.update_relationships(|existing| {
                    let mut next = existing.to_vec();
                    for sketch in &sketches {
                        let duplicate = next.iter().any(|r| {
                            name_matches(&r.source, &sketch.source)
                                && name_matches(&r.target, &sketch.target)
                                && name_matches(&r.kind, &sketch.kind)
                        });
                        if !duplicate {
                            next.push(relationship_from_sketch(sketch));
                            added += 1;
                        }
                    }
                    next
                });
                self.notifier_mut()
                    .success(format!("Found {added} new relationships."));
                Ok(added)
            }
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("extract relationships", &error);
                Err(error)
            }
        }
    }

    /// Multi-axis narrative analysis of the active novel. Read-only: the
    /// report goes back to the caller, not into the document.
    pub async fn analyze_active_novel(&mut self, ai: &AiService) -> Result<NarrativeReport> {
        let (prose, language) = self.active_manuscript()?;
        match ai.analyze_narrative(&prose, &language).await {
            Ok(report) => Ok(report),
            Err(e) => {
                let error = StudioError::from(e);
                self.notify_failure("analyze", &error);
                Err(error)
            }
        }
    }
}

fn name_matches(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn character_from_sketch(sketch: &CharacterSketch) -> Character {
    let mut character = Character::new(sketch.name.trim());
    character.role = CharacterRole::parse_lenient(&sketch.role);
    character.description = sketch.description.clone();
    character.traits = sketch.traits.clone();
    character
}

fn place_from_sketch(sketch: &PlaceSketch) -> Place {
    let mut place = Place::new(sketch.name.trim());
    place.description = sketch.description.clone();
    place.significance = sketch.significance.clone();
    place
}

fn event_from_sketch(sketch: &TimelineSketch) -> TimelineEvent {
    let mut event = TimelineEvent::new(sketch.title.trim());
    event.moment = sketch.moment.clone();
    event.description = sketch.description.clone();
    event
}

fn relationship_from_sketch(sketch: &RelationshipSketch) -> Relationship {
    let mut relationship = Relationship::new(
        sketch.source.trim(),
        sketch.target.trim(),
        sketch.kind.trim(),
    );
    relationship.description = sketch.description.clone();
    relationship
}
