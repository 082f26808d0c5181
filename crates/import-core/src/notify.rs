//! Notification collaborator for user-facing messages

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Default,
    Success,
    Error,
    Primary,
}

/// Sink for user-facing notifications
pub trait Notifier {
    /// Show a message to the user
    fn show(&mut self, message: &str, severity: Severity);
}

/// Notifier that records messages, for tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    /// All shown messages with their severity, in order
    pub messages: Vec<(String, Severity)>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// The last message shown, if any
    pub fn last(&self) -> Option<&(String, Severity)> {
        self.messages.last()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}
