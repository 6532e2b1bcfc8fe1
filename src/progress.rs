//! Utilities to track pending fetches, i.e. the loading indicator

use std::fmt::{Display, Error, Formatter};

/// What a fetch is currently doing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadEvent {
    /// Nothing has been fetched yet
    NotStarted,
    /// A fetch is pending: the loading indicator is visible
    Loading { what: String },
    /// The last fetch succeeded
    Loaded { what: String, count: usize },
    /// The last fetch failed
    Failed { what: String, reason: String },
}

impl LoadEvent {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadEvent::Loading { .. })
    }
}

impl Display for LoadEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LoadEvent::NotStarted => write!(f, "Not started"),
            LoadEvent::Loading { what } => write!(f, "Loading {}...", what),
            LoadEvent::Loaded { what, count } => write!(f, "Loaded {} {}", count, what),
            LoadEvent::Failed { what, reason } => write!(f, "Unable to load {}: {}", what, reason),
        }
    }
}

impl Default for LoadEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}


/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<LoadEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<LoadEvent>;

/// Create a feedback channel, that can be used to drive a loading indicator
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(LoadEvent::default())
}


/// Tracks whether a fetch is pending, and reports it to the listener (if any)
#[derive(Debug, Default)]
pub struct LoadProgress {
    current: LoadEvent,
    feedback_channel: Option<FeedbackSender>,
}

impl LoadProgress {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_feedback_channel(channel: FeedbackSender) -> Self {
        Self { current: LoadEvent::default(), feedback_channel: Some(channel) }
    }

    pub fn is_loading(&self) -> bool {
        self.current.is_loading()
    }

    pub fn current(&self) -> &LoadEvent {
        &self.current
    }

    /// Show the loading indicator. Call this right before sending a request
    pub fn start(&mut self, what: &str) {
        log::debug!("Loading {}...", what);
        self.set(LoadEvent::Loading { what: what.to_string() });
    }

    /// Hide the loading indicator after a successful fetch
    pub fn finish(&mut self, what: &str, count: usize) {
        log::info!("Loaded {} {}", count, what);
        self.set(LoadEvent::Loaded { what: what.to_string(), count });
    }

    /// Hide the loading indicator after a failed fetch
    pub fn fail(&mut self, what: &str, reason: &dyn std::fmt::Display) {
        log::warn!("Unable to load {}: {}", what, reason);
        self.set(LoadEvent::Failed { what: what.to_string(), reason: reason.to_string() });
    }

    fn set(&mut self, event: LoadEvent) {
        self.current = event.clone();
        if let Some(sender) = &self.feedback_channel {
            // Nobody listening is fine
            let _ = sender.send(event);
        }
    }
}
