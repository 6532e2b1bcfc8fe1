//! Transient, auto-dismissing notifications ("toasts")

use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::traits::Notifier;

/// How long a notification stays on screen
pub const DISMISS_AFTER: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    /// Warnings and dangers report a failure, the others report progress
    pub fn is_failure(&self) -> bool {
        matches!(self, Level::Warning | Level::Danger)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Unique, so that a notification can be dismissed individually
    pub id: String,
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new<S: ToString>(level: Level, message: S) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_hyphenated().to_string(),
            level,
            message: message.to_string(),
        }
    }

    pub fn success<S: ToString>(message: S) -> Self { Self::new(Level::Success, message) }
    pub fn info<S: ToString>(message: S) -> Self    { Self::new(Level::Info, message) }
    pub fn warning<S: ToString>(message: S) -> Self { Self::new(Level::Warning, message) }
    pub fn danger<S: ToString>(message: S) -> Self  { Self::new(Level::Danger, message) }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}

/// Keeps every notification, in order. Handy for tests and for UIs that drain them on each frame
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// A notifier that only writes to the log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            Level::Success | Level::Info => log::info!("{}", notification),
            Level::Warning => log::warn!("{}", notification),
            Level::Danger => log::error!("{}", notification),
        }
    }
}
