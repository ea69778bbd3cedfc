//! Autosave configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default periodic save interval: five minutes.
pub const DEFAULT_INTERVAL_MS: u64 = 300_000;

/// How long a successful save is reported as `Success` before decaying to
/// `Idle`.
pub const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 1_500;

/// Configuration for autosave behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Whether the periodic trigger is enabled. Manual and exit saves work
    /// regardless.
    pub enabled: bool,

    /// Periodic save interval in milliseconds.
    pub interval_ms: u64,

    /// How long the `Success` status stays visible, in milliseconds.
    pub success_display_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            success_display_ms: DEFAULT_SUCCESS_DISPLAY_MS,
        }
    }
}

impl AutosaveConfig {
    /// Create a config with the periodic trigger disabled.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Periodic interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Success display delay as a [`Duration`].
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}
