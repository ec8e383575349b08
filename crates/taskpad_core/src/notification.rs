//! Single-slot transient status message.
//!
//! A new message replaces the current one and restarts the countdown;
//! the slot empties once `NOTIFICATION_TTL_MS` has elapsed since the
//! latest `show`.

/// Lifetime of a notification in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 3_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSlot {
    message: Option<String>,
    clear_at_ms: Option<i64>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, now_ms: i64) {
        self.message = Some(message.into());
        self.clear_at_ms = Some(now_ms.saturating_add(NOTIFICATION_TTL_MS));
    }

    /// Expires the message when its deadline has passed.
    ///
    /// Returns `true` when this call cleared a message.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        match self.clear_at_ms {
            Some(deadline) if now_ms >= deadline => {
                self.message = None;
                self.clear_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationSlot, NOTIFICATION_TTL_MS};

    #[test]
    fn message_clears_after_ttl() {
        let mut slot = NotificationSlot::new();
        slot.show("Task added!", 100);

        assert!(!slot.tick(100 + NOTIFICATION_TTL_MS - 1));
        assert_eq!(slot.current(), Some("Task added!"));
        assert!(slot.tick(100 + NOTIFICATION_TTL_MS));
        assert_eq!(slot.current(), None);
        assert!(!slot.tick(i64::MAX));
    }

    #[test]
    fn new_message_replaces_and_restarts_countdown() {
        let mut slot = NotificationSlot::new();
        slot.show("Task added!", 0);
        slot.show("Task deleted!", 2_000);

        assert!(!slot.tick(NOTIFICATION_TTL_MS));
        assert_eq!(slot.current(), Some("Task deleted!"));
        assert!(!slot.tick(2_000 + NOTIFICATION_TTL_MS - 1));
        assert!(slot.tick(2_000 + NOTIFICATION_TTL_MS));
        assert_eq!(slot.current(), None);
    }
}
