//! User-facing notifications.
//!
//! The toast surface reframed as an explicitly-constructed service: the
//! session owns one [`Notifier`] and passes it by reference to whatever
//! needs it. The queue is bounded; when it overflows, the oldest entry is
//! dropped; a notification the user never saw is not worth unbounded
//! memory.

use std::collections::VecDeque;

/// Bound on queued notifications.
const QUEUE_LIMIT: usize = 32;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// One dismissible message for the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

/// Queue of pending notifications.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Notification>,
}

impl Notifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an informational message.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Info, message.into());
    }

    /// Queue a success message.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Success, message.into());
    }

    /// Queue an error message.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Error, message.into());
    }

    /// Number of pending notifications.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take all pending notifications, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    fn push(&mut self, level: NotifyLevel, message: String) {
        if self.queue.len() == QUEUE_LIMIT {
            self.queue.pop_front();
        }
        tracing::debug!(?level, %message, "notification");
        self.queue.push_back(Notification { level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_oldest_first() {
        let mut notifier = Notifier::new();
        notifier.info("one");
        notifier.error("two");

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "one");
        assert_eq!(drained[1].level, NotifyLevel::Error);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut notifier = Notifier::new();
        for i in 0..(QUEUE_LIMIT + 5) {
            notifier.info(format!("message {i}"));
        }
        assert_eq!(notifier.len(), QUEUE_LIMIT);
        // The oldest entries were dropped.
        assert_eq!(notifier.drain()[0].message, "message 5");
    }
}
