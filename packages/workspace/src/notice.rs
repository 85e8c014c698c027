//! Transient user-visible notifications (toasts)

use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sending half handed to everything that reports to the user
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(Notice::Success(message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(Notice::Error(message.into()));
    }

    fn send(&self, notice: Notice) {
        // Nobody listening is fine (headless use)
        if let Err(e) = self.tx.send(notice) {
            debug!(notice = %e.0, "Dropped notice, receiver closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("Saved");
        notifier.error("Failed");

        assert_eq!(rx.try_recv().unwrap(), Notice::Success("Saved".to_string()));
        let error = rx.try_recv().unwrap();
        assert!(error.is_error());
        assert_eq!(error.to_string(), "Failed");
    }

    #[test]
    fn test_send_without_receiver_is_silent() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.error("nobody hears this");
    }
}
