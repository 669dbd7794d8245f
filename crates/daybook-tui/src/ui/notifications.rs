// Transient status line messages with auto-dismiss.
// Messages carry their own leading glyph ("✓ Saved", "→ Next"); the level only picks the colour.

use std::time::{Duration, Instant};

use daybook_core::constants::STATUS_TIMEOUT_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
    pub shown_at: Instant,
    /// Confirmation prompts stay until the user answers them
    pub sticky: bool,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            duration: Duration::from_secs(STATUS_TIMEOUT_SECS),
            shown_at: Instant::now(),
            sticky: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error)
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        !self.sticky && now.duration_since(self.shown_at) >= self.duration
    }
}
