use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Transient notification surface (toasts in the browser).
pub trait Notifier {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Error => error!("{}", message),
            NotificationLevel::Warning => warn!("{}", message),
            NotificationLevel::Success | NotificationLevel::Info => info!("{}", message),
        }
    }
}

/// Keeps every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.received.lock().last().cloned()
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        self.received.lock().iter().filter(|n| n.level == level).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.received.lock().push(Notification {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.success("Saved");
        notifier.error("Upload failed");
        notifier.notify(NotificationLevel::Info, "Loading");

        assert_eq!(notifier.notifications().len(), 3);
        assert_eq!(notifier.count(NotificationLevel::Error), 1);
        assert_eq!(
            notifier.last(),
            Some(Notification {
                level: NotificationLevel::Info,
                message: "Loading".into()
            })
        );
    }
}
