use serde::{Deserialize, Serialize};
use tracing::info;

/// Outbound notification payload emitted on timetable and extension
/// transitions. Delivery transport lives behind `NotificationPublisher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Trait describing outbound notification hooks (e-mail or queue adapters).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Publisher that records notifications to the log stream. Used by the
/// binary where no mail transport is wired up.
#[derive(Debug, Default)]
pub struct LogPublisher;

impl NotificationPublisher for LogPublisher {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            recipients = notification.recipients.join(", "),
            subject = %notification.subject,
            "notification dispatched"
        );
        Ok(())
    }
}
