//! The active novel/chapter selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nws_model::Novel;

/// Which novel is open, and the last-open chapter per novel.
///
/// Selection is remembered convenience, not document content: ids that stop
/// resolving (after delete, undo, or import) are repaired by dropping them,
/// never by failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// The open novel, if any.
    pub active_novel_id: Option<Uuid>,

    /// Last-open chapter per novel.
    pub active_chapter_ids: BTreeMap<Uuid, Uuid>,
}

impl Selection {
    /// The remembered chapter for the active novel.
    pub fn active_chapter_id(&self) -> Option<Uuid> {
        let novel_id = self.active_novel_id?;
        self.active_chapter_ids.get(&novel_id).copied()
    }

    /// Select a novel and fall back to its first chapter when no chapter is
    /// remembered for it.
    pub fn select_novel(&mut self, novel: &Novel) {
        self.active_novel_id = Some(novel.id);
        let remembered = self
            .active_chapter_ids
            .get(&novel.id)
            .copied()
            .filter(|id| novel.chapter(*id).is_some());
        match remembered.or_else(|| novel.first_chapter_id()) {
            Some(chapter_id) => {
                self.active_chapter_ids.insert(novel.id, chapter_id);
            }
            None => {
                self.active_chapter_ids.remove(&novel.id);
            }
        }
    }

    /// Remember a chapter for a novel.
    pub fn select_chapter(&mut self, novel_id: Uuid, chapter_id: Uuid) {
        self.active_chapter_ids.insert(novel_id, chapter_id);
    }

    /// Drop every id that no longer resolves against the library.
    ///
    /// Called after deletes, undo/redo, and imports: time travel can remove
    /// the selected novel out from under the selection.
    pub fn repair(&mut self, novels: &[Novel]) {
        self.active_chapter_ids.retain(|novel_id, chapter_id| {
            novels
                .iter()
                .find(|n| n.id == *novel_id)
                .is_some_and(|n| n.chapter(*chapter_id).is_some())
        });
        if let Some(active) = self.active_novel_id
            && !novels.iter().any(|n| n.id == active)
        {
            self.active_novel_id = None;
        }
        // A surviving active novel may have lost its remembered chapter.
        if let Some(active) = self.active_novel_id
            && !self.active_chapter_ids.contains_key(&active)
            && let Some(novel) = novels.iter().find(|n| n.id == active)
            && let Some(first) = novel.first_chapter_id()
        {
            self.active_chapter_ids.insert(active, first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_novel_falls_back_to_first_chapter() {
        let novel = Novel::new("Draft");
        let mut selection = Selection::default();
        selection.select_novel(&novel);
        assert_eq!(selection.active_novel_id, Some(novel.id));
        assert_eq!(selection.active_chapter_id(), novel.first_chapter_id());
    }

    #[test]
    fn test_select_novel_keeps_remembered_chapter() {
        let mut novel = Novel::new("Draft");
        novel.chapters.push(nws_model::Chapter::new("Two"));
        let second = novel.chapters[1].id;

        let mut selection = Selection::default();
        selection.select_chapter(novel.id, second);
        selection.select_novel(&novel);
        assert_eq!(selection.active_chapter_id(), Some(second));
    }

    #[test]
    fn test_repair_drops_dangling_and_restores_chapter() {
        let kept = Novel::new("Kept");
        let gone = Novel::new("Gone");

        let mut selection = Selection::default();
        selection.select_novel(&gone);
        selection.repair(std::slice::from_ref(&kept));
        assert_eq!(selection.active_novel_id, None);
        assert!(selection.active_chapter_ids.is_empty());

        // Active novel survives but its remembered chapter vanished.
        let mut edited = kept.clone();
        selection.select_novel(&edited);
        let old_first = edited.chapters[0].id;
        edited.chapters[0] = nws_model::Chapter::new("Rewritten");
        selection.repair(std::slice::from_ref(&edited));
        assert_eq!(selection.active_novel_id, Some(edited.id));
        assert_ne!(selection.active_chapter_id(), Some(old_first));
        assert_eq!(selection.active_chapter_id(), edited.first_chapter_id());
    }
}
