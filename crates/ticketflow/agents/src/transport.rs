//! Notification transports

use std::sync::Mutex;

use crate::traits::NotificationTransport;

/// Transport that logs instead of sending. Every send "succeeds".
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunTransport;

impl DryRunTransport {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationTransport for DryRunTransport {
    fn send(&self, subject: &str, body: &str, to: &str) -> bool {
        tracing::info!(to, subject, body_len = body.len(), "dry-run notification");
        true
    }
}

/// A notification captured by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub subject: String,
    pub body: String,
    pub to: String,
}

/// Transport that captures every send for inspection, reporting a fixed
/// outcome. Used by tests and local harnesses.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    outcome: bool,
    sent: Mutex<Vec<SentNotification>>,
}

impl RecordingTransport {
    /// Records sends and reports success
    pub fn new() -> Self {
        Self {
            outcome: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Records sends and reports failure
    pub fn failing() -> Self {
        Self {
            outcome: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Everything sent so far, in order
    pub fn sent(&self) -> Vec<SentNotification> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NotificationTransport for RecordingTransport {
    fn send(&self, subject: &str, body: &str, to: &str) -> bool {
        let notification = SentNotification {
            subject: subject.to_string(),
            body: body.to_string(),
            to: to.to_string(),
        };
        match self.sent.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
        self.outcome
    }
}
