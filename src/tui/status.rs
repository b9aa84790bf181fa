//! Transient status messages with auto-clear.

use std::time::{Duration, Instant};

/// How long a transient status stays visible after it was last set.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// A temporary status string ("Updated", "Connection Failed") that clears
/// itself a fixed delay after the latest `set`.
///
/// The expiry deadline travels with the message instance: setting a new
/// message resets the clock, so an older message's deadline can never blank
/// a newer one. Last message wins for its own full duration.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<String>,
    set_at: Option<Instant>,
    auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    /// A status that auto-clears after [`STATUS_TTL`].
    #[must_use]
    pub const fn transient() -> Self {
        Self {
            message: None,
            set_at: None,
            auto_clear_after: Some(STATUS_TTL),
        }
    }

    /// A status with a custom auto-clear duration.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    /// Set a message, restarting the clear timer.
    pub fn set(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.set_at = Some(Instant::now());
    }

    /// Clear immediately.
    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// Current message, expiring it first if its time is up.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after) {
            if set_at.elapsed() >= duration {
                self.message = None;
                self.set_at = None;
            }
        }
        self.message.as_deref()
    }

    /// Current message without mutating expiry state.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_and_clear() {
        let mut status = StatusMessage::transient();
        assert!(!status.has_message());

        status.set("Updated");
        assert_eq!(status.peek(), Some("Updated"));

        status.clear();
        assert!(status.peek().is_none());
    }

    #[test]
    fn test_auto_clear_expires() {
        let mut status = StatusMessage::with_auto_clear(Duration::from_millis(30));
        status.set("Connection Failed");
        assert!(status.message().is_some());

        thread::sleep(Duration::from_millis(40));
        assert!(status.message().is_none());
    }

    #[test]
    fn test_newer_message_outlives_older_deadline() {
        let mut status = StatusMessage::with_auto_clear(Duration::from_millis(50));
        status.set("first");

        thread::sleep(Duration::from_millis(35));
        status.set("second");

        // The first message's deadline has passed; the second must survive.
        thread::sleep(Duration::from_millis(25));
        assert_eq!(status.message(), Some("second"));

        thread::sleep(Duration::from_millis(35));
        assert!(status.message().is_none());
    }
}
