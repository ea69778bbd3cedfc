//! Bounded undo/redo history over an arbitrary value.
//!
//! [`History`] keeps three partitions: `past` (undo targets, oldest first),
//! `present` (the authoritative current value), and `future` (redo targets,
//! nearest first). Every mutation goes through [`History::apply`] or
//! [`History::replace`]; a computed value that is structurally equal to the
//! current present is a no-op: no history entry is recorded, so downstream
//! change detection (autosave) sees nothing.
//!
//! The past is bounded: once `limit` entries accumulate, the oldest is
//! dropped on the next push, so undo depth is finite and memory stays flat
//! no matter how long an editing session runs.
//!
//! These are pure data transformations; no operation here can fail.

use std::collections::VecDeque;

/// Default bound on undo depth.
pub const DEFAULT_LIMIT: usize = 50;

/// Past/present/future undo stack over a value `D`.
///
/// `D` needs `Clone` (snapshots are stored by value) and `PartialEq` (deep
/// structural equality drives the no-op check; derived `PartialEq` compares
/// map-typed fields independent of key order).
#[derive(Debug, Clone)]
pub struct History<D> {
    past: VecDeque<D>,
    present: D,
    future: VecDeque<D>,
    limit: usize,
}

impl<D: Clone + PartialEq> History<D> {
    /// Create a history around an initial value with the default depth.
    pub fn new(present: D) -> Self {
        Self::with_limit(present, DEFAULT_LIMIT)
    }

    /// Create a history with an explicit depth bound (minimum 1).
    pub fn with_limit(present: D, limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// The authoritative current value.
    pub fn present(&self) -> &D {
        &self.present
    }

    /// Whether an undo target exists.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo target exists.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of available undo steps.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of available redo steps.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Configured depth bound.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Compute a new present from the previous one.
    ///
    /// Returns `true` when the value actually changed. A structurally equal
    /// result is a no-op: no entry is pushed, the future is kept, and `false`
    /// comes back so callers skip change propagation.
    pub fn apply(&mut self, updater: impl FnOnce(&D) -> D) -> bool {
        let next = updater(&self.present);
        self.replace(next)
    }

    /// Replace the present with a direct value.
    ///
    /// Same no-op contract as [`History::apply`]. On an effective change the
    /// old present joins the bounded past and all redo targets are discarded.
    pub fn replace(&mut self, value: D) -> bool {
        if value == self.present {
            return false;
        }
        self.push_past(self.present.clone());
        self.present = value;
        self.future.clear();
        true
    }

    /// Step back once. No-op (returning `false`) when the past is empty.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Step forward once. No-op (returning `false`) when the future is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        true
    }

    /// Replace the whole triple with a fresh present and no history.
    ///
    /// Used when a different document set is loaded: undo history never
    /// crosses documents.
    pub fn reset(&mut self, value: D) {
        self.past.clear();
        self.future.clear();
        self.present = value;
    }

    /// Teardown: drop undo/redo targets, keep the present.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, value: D) {
        if self.past.len() == self.limit {
            self.past.pop_front();
        }
        self.past.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_is_clean() {
        let history = History::new(0);
        assert_eq!(*history.present(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_replace_pushes_and_undo_returns() {
        let mut history = History::new(1);
        assert!(history.replace(2));
        assert!(history.replace(3));
        assert_eq!(*history.present(), 3);
        assert_eq!(history.undo_depth(), 2);

        assert!(history.undo());
        assert_eq!(*history.present(), 2);
        assert!(history.undo());
        assert_eq!(*history.present(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_equal_value_is_noop() {
        let mut history = History::new(vec![1, 2, 3]);
        assert!(!history.replace(vec![1, 2, 3]));
        assert!(!history.can_undo());

        assert!(history.replace(vec![1, 2]));
        // Same value again through the updater face.
        assert!(!history.apply(|v| v.clone()));
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_undo_on_empty_past_is_noop() {
        let mut history = History::new(7);
        assert!(!history.undo());
        assert_eq!(*history.present(), 7);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_roundtrip() {
        let mut history = History::new("a".to_string());
        history.replace("b".to_string());
        history.undo();
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(history.present(), "b");
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_new_edit_clears_future() {
        let mut history = History::new(1);
        history.replace(2);
        history.undo();
        assert!(history.can_redo());

        history.replace(9);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(*history.present(), 9);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut history = History::new(1);
        history.replace(2);
        history.replace(3);
        history.undo();

        history.reset(42);
        assert_eq!(*history.present(), 42);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_keeps_present() {
        let mut history = History::new(1);
        history.replace(2);
        history.undo();

        history.clear();
        assert_eq!(*history.present(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_past_is_bounded_fifo() {
        let mut history = History::with_limit(0, 5);
        for v in 1..=20 {
            history.replace(v);
        }
        assert_eq!(history.undo_depth(), 5);

        // Undoing to the floor lands on the oldest retained entry, not 0.
        while history.undo() {}
        assert_eq!(*history.present(), 15);
    }

    #[test]
    fn test_redo_respects_bound() {
        let mut history = History::with_limit(0, 3);
        for v in 1..=3 {
            history.replace(v);
        }
        for _ in 0..3 {
            history.undo();
        }
        for _ in 0..3 {
            history.redo();
        }
        assert_eq!(*history.present(), 3);
        assert_eq!(history.undo_depth(), 3);
    }

    #[test]
    fn test_apply_sees_latest_present() {
        let mut history = History::new(10);
        history.apply(|v| v + 1);
        history.apply(|v| v * 2);
        assert_eq!(*history.present(), 22);
        assert_eq!(history.undo_depth(), 2);
    }
}
