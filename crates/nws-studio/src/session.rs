//! The studio session: composition root for a library of novels.
//!
//! A session owns the library store, the undo/redo history over the novels
//! list, the active selection, the autosave coordinator, and the
//! notification queue. All document edits flow through the mutation layer
//! here: each feature surface gets a narrow, collection-scoped updater and
//! never sees the full document shape or the history manager.
//!
//! Data flow: updater → history `replace` (push old present, clear future)
//! → autosave change detection → store write.

use nws_history::History;
use nws_model::{
    Chapter, Character, Novel, NovelImage, Place, PlanSection, Relationship, TimelineEvent,
};
use nws_persistence::{
    Autosave, AutosaveConfig, KeyValueStore, LibraryEnvelope, LibraryStore, SaveOutcome,
    SaveStatus, backup,
};
use uuid::Uuid;

use crate::error::{Result, StudioError};
use crate::export::{ManuscriptFormat, render_manuscript};
use crate::notify::{Notification, Notifier};
use crate::selection::Selection;

/// A live editing session over a library of novels.
pub struct StudioSession<S> {
    store: LibraryStore<S>,
    history: History<Vec<Novel>>,
    selection: Selection,
    autosave: Autosave,
    notifier: Notifier,
    loaded: bool,
}

impl<S: KeyValueStore> StudioSession<S> {
    /// Create a session over a store. Call [`StudioSession::open`] before
    /// anything else; a session that is not open holds an empty library and
    /// refuses mutation.
    pub fn new(store: S, autosave_config: AutosaveConfig) -> Self {
        Self {
            store: LibraryStore::new(store),
            history: History::new(Vec::new()),
            selection: Selection::default(),
            autosave: Autosave::new(autosave_config),
            notifier: Notifier::new(),
            loaded: false,
        }
    }

    /// Hydrate the session from the store, once.
    ///
    /// An absent key is a normal first run: the library starts empty with no
    /// active novel. A present envelope becomes the history present via
    /// `reset` (undo history never crosses loads), the stored selection is
    /// restored with dangling ids dropped, and the autosave baseline is
    /// primed so an unchanged library triggers no save.
    pub fn open(&mut self) -> Result<()> {
        match self.store.load()? {
            Some(mut envelope) => {
                envelope.check_integrity()?;
                envelope.prune_selection();
                self.selection = Selection {
                    active_novel_id: envelope.active_novel_id,
                    active_chapter_ids: envelope.active_chapter_ids,
                };
                self.history.reset(envelope.novels);
            }
            None => {
                self.selection = Selection::default();
                self.history.reset(Vec::new());
            }
        }
        self.rebaseline();
        self.loaded = true;
        tracing::info!(novels = self.history.present().len(), "session open");
        Ok(())
    }

    /// Whether [`StudioSession::open`] has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All novels in the library.
    pub fn novels(&self) -> &[Novel] {
        self.history.present()
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The active novel, if one is selected.
    pub fn active_novel(&self) -> Option<&Novel> {
        let id = self.selection.active_novel_id?;
        self.history.present().iter().find(|n| n.id == id)
    }

    /// The active chapter of the active novel, if both are selected.
    pub fn active_chapter(&self) -> Option<&Chapter> {
        let chapter_id = self.selection.active_chapter_id()?;
        self.active_novel()?.chapter(chapter_id)
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    pub(crate) fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    // ---- novel CRUD ----

    /// Create a novel (with its seeded first chapter), select it, and select
    /// that chapter. Exactly one history entry.
    pub fn create_novel(&mut self, title: impl Into<String>) -> Result<Uuid> {
        if !self.loaded {
            return Err(StudioError::SessionClosed);
        }
        let novel = Novel::new(title);
        let id = novel.id;
        self.history.apply(|novels| {
            let mut next = novels.clone();
            next.push(novel.clone());
            next
        });
        self.selection.select_novel(&novel);
        tracing::info!(%id, "created novel");
        Ok(id)
    }

    /// Delete a novel. The selection is repaired afterwards.
    pub fn delete_novel(&mut self, id: Uuid) -> Result<()> {
        if !self.loaded {
            return Err(StudioError::SessionClosed);
        }
        if !self.history.present().iter().any(|n| n.id == id) {
            return Err(StudioError::UnknownNovel { id });
        }
        self.history.apply(|novels| {
            novels.iter().filter(|n| n.id != id).cloned().collect()
        });
        self.selection.repair(self.history.present());
        tracing::info!(%id, "deleted novel");
        Ok(())
    }

    /// Edit the active novel's metadata (title, author, synopsis, genre,
    /// language). A closure that changes nothing is a no-op with no history
    /// entry; an effective edit bumps `updated_at`.
    pub fn update_novel_meta(&mut self, edit: impl FnOnce(&mut Novel)) -> bool {
        if !self.loaded {
            tracing::debug!("metadata edit skipped: session closed");
            return false;
        }
        let Some(active_id) = self.selection.active_novel_id else {
            tracing::debug!("metadata edit skipped: no active novel");
            return false;
        };
        let mut novels = self.history.present().clone();
        let Some(novel) = novels.iter_mut().find(|n| n.id == active_id) else {
            return false;
        };
        let before = novel.clone();
        edit(novel);
        if *novel == before {
            return false;
        }
        novel.touch();
        self.history.replace(novels)
    }

    // ---- selection ----

    /// Open a novel. Falls back to its first chapter when no chapter is
    /// remembered for it.
    pub fn select_novel(&mut self, id: Uuid) -> Result<()> {
        if !self.loaded {
            return Err(StudioError::SessionClosed);
        }
        let Some(novel) = self.history.present().iter().find(|n| n.id == id) else {
            return Err(StudioError::UnknownNovel { id });
        };
        let novel = novel.clone();
        self.selection.select_novel(&novel);
        Ok(())
    }

    /// Open a chapter of the active novel.
    pub fn select_chapter(&mut self, chapter_id: Uuid) -> Result<()> {
        if !self.loaded {
            return Err(StudioError::SessionClosed);
        }
        let novel = self.active_novel().ok_or(StudioError::NoActiveNovel)?;
        if novel.chapter(chapter_id).is_none() {
            return Err(StudioError::UnknownChapter { id: chapter_id });
        }
        let novel_id = novel.id;
        self.selection.select_chapter(novel_id, chapter_id);
        Ok(())
    }

    // ---- mutation layer ----

    /// Update the active novel's chapters.
    pub fn update_chapters(&mut self, updater: impl FnOnce(&[Chapter]) -> Vec<Chapter>) -> bool {
        self.update_collection(|n| &n.chapters, |n, v| n.chapters = v, updater)
    }

    /// Update the active novel's character roster.
    pub fn update_characters(
        &mut self,
        updater: impl FnOnce(&[Character]) -> Vec<Character>,
    ) -> bool {
        self.update_collection(|n| &n.characters, |n, v| n.characters = v, updater)
    }

    /// Update the active novel's places.
    pub fn update_places(&mut self, updater: impl FnOnce(&[Place]) -> Vec<Place>) -> bool {
        self.update_collection(|n| &n.places, |n, v| n.places = v, updater)
    }

    /// Update the active novel's images.
    pub fn update_images(
        &mut self,
        updater: impl FnOnce(&[NovelImage]) -> Vec<NovelImage>,
    ) -> bool {
        self.update_collection(|n| &n.images, |n, v| n.images = v, updater)
    }

    /// Update the active novel's timeline.
    pub fn update_timeline(
        &mut self,
        updater: impl FnOnce(&[TimelineEvent]) -> Vec<TimelineEvent>,
    ) -> bool {
        self.update_collection(|n| &n.timeline, |n, v| n.timeline = v, updater)
    }

    /// Update the active novel's relationships.
    pub fn update_relationships(
        &mut self,
        updater: impl FnOnce(&[Relationship]) -> Vec<Relationship>,
    ) -> bool {
        self.update_collection(|n| &n.relationships, |n, v| n.relationships = v, updater)
    }

    /// Update the active novel's plan sections.
    pub fn update_plan(
        &mut self,
        updater: impl FnOnce(&[PlanSection]) -> Vec<PlanSection>,
    ) -> bool {
        self.update_collection(|n| &n.plan, |n, v| n.plan = v, updater)
    }

    /// Replace the content of the active chapter.
    pub fn set_active_chapter_content(&mut self, content: impl Into<String>) -> bool {
        let Some(chapter_id) = self.selection.active_chapter_id() else {
            tracing::debug!("content edit skipped: no active chapter");
            return false;
        };
        let content = content.into();
        self.update_chapters(|chapters| {
            chapters
                .iter()
                .map(|c| {
                    if c.id == chapter_id {
                        let mut edited = c.clone();
                        edited.content = content.clone();
                        edited
                    } else {
                        c.clone()
                    }
                })
                .collect()
        })
    }

    /// The shared updater contract: locate the active novel, apply the
    /// collection updater to just that novel's named sub-collection, leave
    /// every other novel and sub-collection untouched, and delegate the new
    /// whole list to the history manager.
    ///
    /// With no active novel selected this is a silent no-op, so feature
    /// surfaces never guard against a null selection themselves. A
    /// deep-equal result is likewise a no-op and does not bump `updated_at`.
    fn update_collection<T: Clone + PartialEq>(
        &mut self,
        get: impl Fn(&Novel) -> &Vec<T>,
        set: impl FnOnce(&mut Novel, Vec<T>),
        updater: impl FnOnce(&[T]) -> Vec<T>,
    ) -> bool {
        if !self.loaded {
            tracing::debug!("collection update skipped: session closed");
            return false;
        }
        let Some(active_id) = self.selection.active_novel_id else {
            tracing::debug!("collection update skipped: no active novel");
            return false;
        };
        let mut novels = self.history.present().clone();
        let Some(novel) = novels.iter_mut().find(|n| n.id == active_id) else {
            return false;
        };
        let next = updater(get(novel));
        if next == *get(novel) {
            return false;
        }
        set(novel, next);
        novel.touch();
        self.history.replace(novels)
    }

    // ---- undo/redo ----

    /// Step the whole library back once. Repairs the selection: an undone
    /// novel may vanish out from under it.
    pub fn undo(&mut self) -> bool {
        if !self.loaded {
            return false;
        }
        let changed = self.history.undo();
        if changed {
            self.selection.repair(self.history.present());
        }
        changed
    }

    /// Step the whole library forward once.
    pub fn redo(&mut self) -> bool {
        if !self.loaded {
            return false;
        }
        let changed = self.history.redo();
        if changed {
            self.selection.repair(self.history.present());
        }
        changed
    }

    /// Whether an undo target exists.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo target exists.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- persistence ----

    /// Drive the periodic autosave trigger. Returns the outcome when a save
    /// was due and attempted.
    pub fn poll_autosave(&mut self) -> Option<SaveOutcome> {
        let due = {
            let tracked = (self.history.present(), &self.selection);
            self.autosave.poll(&tracked)
        };
        if !due {
            return None;
        }
        Some(self.persist(false))
    }

    /// Save now, bypassing the timer but still subject to the
    /// nothing-changed skip.
    pub fn manual_save(&mut self) -> SaveOutcome {
        self.persist(false)
    }

    /// Close the session: one best-effort exit save, then teardown of the
    /// undo history. No durability promise beyond the attempt. A closed
    /// session refuses further mutation until [`StudioSession::open`] runs
    /// again.
    pub fn close(&mut self) -> SaveOutcome {
        let outcome = self.persist(true);
        self.history.clear();
        self.loaded = false;
        tracing::info!(?outcome, "session closed");
        outcome
    }

    /// Current save status, read-only.
    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    /// Message from the most recent failed save, if any.
    pub fn last_save_error(&self) -> Option<&str> {
        self.autosave.last_error()
    }

    /// Whether anything changed since the last successful save.
    pub fn is_dirty(&self) -> bool {
        let tracked = (self.history.present(), &self.selection);
        self.autosave.is_dirty(&tracked)
    }

    fn persist(&mut self, exit: bool) -> SaveOutcome {
        let Self {
            store,
            history,
            selection,
            autosave,
            ..
        } = self;
        let tracked = (history.present(), &*selection);
        let mut envelope = LibraryEnvelope::new(
            history.present().clone(),
            selection.active_novel_id,
            selection.active_chapter_ids.clone(),
        );
        let save_fn = || store.save(&mut envelope);
        if exit {
            autosave.save_on_exit(&tracked, save_fn)
        } else {
            autosave.save_with(&tracked, save_fn)
        }
    }

    fn rebaseline(&mut self) {
        let tracked = (self.history.present(), &self.selection);
        self.autosave.rebaseline(&tracked);
    }

    // ---- backup ----

    /// The whole library as a pretty JSON backup payload.
    pub fn export_backup(&self) -> Result<String> {
        let envelope = LibraryEnvelope::new(
            self.history.present().clone(),
            self.selection.active_novel_id,
            self.selection.active_chapter_ids.clone(),
        );
        Ok(backup::export_backup(&envelope)?)
    }

    /// Replace the whole library from a backup payload.
    ///
    /// Import is out-of-band: on success the history is reset (undo never
    /// crosses documents), the library is persisted immediately, and the
    /// autosave baseline is re-primed so the old baseline cannot mask the
    /// imported content from change detection. On failure the in-memory
    /// library is left untouched and the error surfaces as a notification.
    pub fn import_backup(&mut self, raw: &str) -> Result<()> {
        if !self.loaded {
            return Err(StudioError::SessionClosed);
        }
        let envelope = match backup::import_backup(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.notifier.error(e.user_message());
                return Err(e.into());
            }
        };
        let count = envelope.novels.len();
        self.selection = Selection {
            active_novel_id: envelope.active_novel_id,
            active_chapter_ids: envelope.active_chapter_ids.clone(),
        };
        self.history.reset(envelope.novels.clone());

        let mut envelope = envelope;
        if let Err(e) = self.store.save(&mut envelope) {
            self.notifier.error(e.user_message());
            return Err(e.into());
        }
        self.rebaseline();
        self.notifier.success(format!(
            "Imported {count} novel{}",
            if count == 1 { "" } else { "s" }
        ));
        Ok(())
    }

    /// Render a novel's manuscript for export.
    pub fn export_manuscript(&self, id: Uuid, format: ManuscriptFormat) -> Result<String> {
        let novel = self
            .history
            .present()
            .iter()
            .find(|n| n.id == id)
            .ok_or(StudioError::UnknownNovel { id })?;
        Ok(render_manuscript(novel, format))
    }

    /// Access the underlying store (tests assert on write counts).
    pub fn store(&self) -> &S {
        self.store.store()
    }
}
