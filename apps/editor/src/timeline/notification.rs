use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// Holds at most one transient notification. A new notification replaces the
/// previous one; visibility lapses on its own once the timeout has elapsed.
/// Expiry is checked against the tokio clock, so nothing is spawned or awaited.
#[derive(Debug, Clone)]
pub struct Notifier {
    timeout: Duration,
    current: Option<Notification>,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current: None,
        }
    }

    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.current = Some(Notification {
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.timeout,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(NotificationKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(NotificationKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(NotificationKind::Info, message);
    }

    /// The visible notification, if one was shown and has not yet expired.
    pub fn current(&self) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| Instant::now() < n.expires_at)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
