//! The autosave state machine.

use std::time::Instant;

use serde::Serialize;

use super::config::AutosaveConfig;
use crate::error::Result;

/// Save status surfaced read-only to the host UI.
///
/// `Idle → Saving → (Success | Error)`; `Success` decays back to `Idle`
/// after the configured display delay; `Error` is sticky until the next
/// triggered attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Success,
    Error,
}

/// What a triggered save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The value differed from baseline and was persisted.
    Saved,
    /// The value matched the baseline; no write happened.
    Skipped,
    /// The save callback failed; status is now [`SaveStatus::Error`].
    Failed,
}

/// Tracks a serializable value against the last persisted snapshot and owns
/// the save-status state machine.
///
/// The coordinator itself is synchronous and never blocks: the host drives
/// [`Autosave::poll`] on its own cadence and performs the actual write inside
/// the callback passed to [`Autosave::save_with`] (pushing it to a blocking
/// pool if it runs under an async runtime). Save callbacks that fail degrade
/// to [`SaveStatus::Error`]; autosave must never crash an editing session.
#[derive(Debug)]
pub struct Autosave {
    config: AutosaveConfig,
    /// Serialized form of the value at the last successful save (or at
    /// mount). `None` means everything is unsaved.
    baseline: Option<String>,
    status: SaveStatus,
    status_since: Instant,
    last_attempt: Instant,
    last_error: Option<String>,
}

impl Autosave {
    /// Create a coordinator with no baseline: any tracked value counts as
    /// changed until the first successful save.
    pub fn new(config: AutosaveConfig) -> Self {
        let now = Instant::now();
        Self {
            config,
            baseline: None,
            status: SaveStatus::Idle,
            status_since: now,
            last_attempt: now,
            last_error: None,
        }
    }

    /// Capture the current value as the baseline, marking the state clean.
    ///
    /// Called once after hydrating from storage, and again after an
    /// out-of-band write (backup import) so the stale baseline cannot mask
    /// the new content from change detection.
    pub fn rebaseline<V: Serialize>(&mut self, value: &V) {
        match serde_json::to_string(value) {
            Ok(snapshot) => self.baseline = Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "could not snapshot baseline; treating state as dirty");
                self.baseline = None;
            }
        }
    }

    /// Whether the tracked value differs from the baseline snapshot.
    pub fn is_dirty<V: Serialize>(&self, value: &V) -> bool {
        let Some(baseline) = &self.baseline else {
            return true;
        };
        match serde_json::to_string(value) {
            Ok(snapshot) => snapshot != *baseline,
            // If the value cannot be serialized the save attempt will
            // surface the real error; report dirty so one is triggered.
            Err(_) => true,
        }
    }

    /// Current status, with `Success` decayed to `Idle` once it has been
    /// visible for the configured display delay.
    pub fn status(&self) -> SaveStatus {
        if self.status == SaveStatus::Success
            && self.status_since.elapsed() >= self.config.success_display()
        {
            SaveStatus::Idle
        } else {
            self.status
        }
    }

    /// Message from the most recent failed save, if the last attempt failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The active configuration.
    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// Replace the configuration (settings panel edits take effect on the
    /// next trigger).
    pub fn set_config(&mut self, config: AutosaveConfig) {
        self.config = config;
    }

    /// Periodic trigger: `true` when the interval has elapsed since the last
    /// attempt, the periodic path is enabled, and the value is dirty.
    ///
    /// Also decays a displayed `Success` back to `Idle`. The host performs
    /// the actual save via [`Autosave::save_with`] when this returns `true`.
    pub fn poll<V: Serialize>(&mut self, value: &V) -> bool {
        if self.status == SaveStatus::Success && self.status() == SaveStatus::Idle {
            self.status = SaveStatus::Idle;
        }
        if !self.config.enabled {
            return false;
        }
        if self.last_attempt.elapsed() < self.config.interval() {
            return false;
        }
        self.is_dirty(value)
    }

    /// Run a save attempt: the single path used by the periodic and manual
    /// triggers.
    ///
    /// Skips without touching status when the value matches the baseline.
    /// Otherwise transitions `Saving`, invokes the callback, and lands on
    /// `Success` (baseline updated to the just-saved snapshot) or `Error`
    /// (callback error captured and logged, never propagated).
    pub fn save_with<V: Serialize>(
        &mut self,
        value: &V,
        save_fn: impl FnOnce() -> Result<()>,
    ) -> SaveOutcome {
        self.last_attempt = Instant::now();

        let snapshot = match serde_json::to_string(value) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "autosave could not serialize tracked value");
                self.enter(SaveStatus::Error);
                self.last_error = Some(e.to_string());
                return SaveOutcome::Failed;
            }
        };
        if self.baseline.as_deref() == Some(snapshot.as_str()) {
            tracing::debug!("autosave skipped: no changes since baseline");
            return SaveOutcome::Skipped;
        }

        self.enter(SaveStatus::Saving);
        match save_fn() {
            Ok(()) => {
                self.baseline = Some(snapshot);
                self.last_error = None;
                self.enter(SaveStatus::Success);
                tracing::debug!("autosave complete");
                SaveOutcome::Saved
            }
            Err(e) => {
                tracing::error!(error = %e, "autosave failed");
                self.last_error = Some(e.user_message());
                self.enter(SaveStatus::Error);
                SaveOutcome::Failed
            }
        }
    }

    /// Best-effort final save for the session-exit path.
    ///
    /// Attempts whenever anything changed since baseline, regardless of the
    /// current status or the periodic interval. The platform makes no
    /// guarantee the write completes before the host goes away; this is one
    /// attempt, not a durability contract.
    pub fn save_on_exit<V: Serialize>(
        &mut self,
        value: &V,
        save_fn: impl FnOnce() -> Result<()>,
    ) -> SaveOutcome {
        let outcome = self.save_with(value, save_fn);
        if outcome == SaveOutcome::Saved {
            // Nobody is left watching the indicator; skip the success display.
            self.enter(SaveStatus::Idle);
        }
        outcome
    }

    fn enter(&mut self, status: SaveStatus) {
        self.status = status;
        self.status_since = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use std::thread;
    use std::time::Duration;

    fn fast_config() -> AutosaveConfig {
        AutosaveConfig {
            enabled: true,
            interval_ms: 20,
            success_display_ms: 20,
        }
    }

    fn save_err() -> PersistenceError {
        PersistenceError::InvalidBackup {
            reason: "boom".to_string(),
        }
    }

    #[test]
    fn test_clean_value_skips_save() {
        let mut autosave = Autosave::new(fast_config());
        autosave.rebaseline(&"doc");

        let mut calls = 0;
        let outcome = autosave.save_with(&"doc", || {
            calls += 1;
            Ok(())
        });
        assert_eq!(outcome, SaveOutcome::Skipped);
        assert_eq!(calls, 0);
        assert_eq!(autosave.status(), SaveStatus::Idle);
    }

    #[test]
    fn test_dirty_value_saves_and_updates_baseline() {
        let mut autosave = Autosave::new(fast_config());
        autosave.rebaseline(&"old");

        let outcome = autosave.save_with(&"new", || Ok(()));
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(autosave.status(), SaveStatus::Success);
        assert!(!autosave.is_dirty(&"new"));

        // Success decays to Idle after the display delay.
        thread::sleep(Duration::from_millis(30));
        assert_eq!(autosave.status(), SaveStatus::Idle);
    }

    #[test]
    fn test_failed_save_is_sticky_until_next_attempt() {
        let mut autosave = Autosave::new(fast_config());
        autosave.rebaseline(&1);

        assert_eq!(autosave.save_with(&2, || Err(save_err())), SaveOutcome::Failed);
        assert_eq!(autosave.status(), SaveStatus::Error);
        assert!(autosave.last_error().is_some());

        // Error stays past the display delay; only the next attempt moves on.
        thread::sleep(Duration::from_millis(30));
        assert_eq!(autosave.status(), SaveStatus::Error);
        assert!(autosave.is_dirty(&2));

        assert_eq!(autosave.save_with(&2, || Ok(())), SaveOutcome::Saved);
        assert_eq!(autosave.status(), SaveStatus::Success);
        assert!(autosave.last_error().is_none());
    }

    #[test]
    fn test_poll_waits_for_interval_and_changes() {
        let mut autosave = Autosave::new(fast_config());
        autosave.rebaseline(&"a");

        // Interval not yet elapsed.
        assert!(!autosave.poll(&"b"));
        thread::sleep(Duration::from_millis(30));
        // Clean value: still no trigger.
        assert!(!autosave.poll(&"a"));
        // Dirty and due.
        assert!(autosave.poll(&"b"));
    }

    #[test]
    fn test_poll_disabled_never_triggers() {
        let mut config = fast_config();
        config.enabled = false;
        let mut autosave = Autosave::new(config);
        autosave.rebaseline(&"a");

        thread::sleep(Duration::from_millis(30));
        assert!(!autosave.poll(&"b"));

        // Manual saves are not gated by `enabled`.
        assert_eq!(autosave.save_with(&"b", || Ok(())), SaveOutcome::Saved);
    }

    #[test]
    fn test_save_resets_poll_interval() {
        let mut autosave = Autosave::new(fast_config());
        autosave.rebaseline(&1);
        thread::sleep(Duration::from_millis(30));

        assert_eq!(autosave.save_with(&2, || Ok(())), SaveOutcome::Saved);
        // The attempt reset the interval clock.
        assert!(!autosave.poll(&3));
    }

    #[test]
    fn test_exit_save_skips_success_display() {
        let mut autosave = Autosave::new(fast_config());
        autosave.rebaseline(&"a");

        assert_eq!(autosave.save_on_exit(&"b", || Ok(())), SaveOutcome::Saved);
        assert_eq!(autosave.status(), SaveStatus::Idle);

        // Clean on exit: nothing to write.
        assert_eq!(autosave.save_on_exit(&"b", || Ok(())), SaveOutcome::Skipped);
    }

    #[test]
    fn test_no_baseline_counts_as_dirty() {
        let autosave = Autosave::new(fast_config());
        assert!(autosave.is_dirty(&Vec::<u8>::new()));
    }
}
