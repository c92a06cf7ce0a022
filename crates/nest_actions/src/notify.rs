//! Fire-and-forget user notifications raised by the dispatcher.

use nest_core::{ActionEvent, Notification, NotificationLevel};
use tokio::sync::mpsc;

pub trait Notifier: Send + Sync {
    /// Must not block or fail; delivery is best effort.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(title = %notification.title, "{}", notification.description)
            }
            NotificationLevel::Error => {
                tracing::warn!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}

/// Forwards notifications as [`ActionEvent::Notification`] on a channel.
/// Drops them when the channel is full or closed.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<ActionEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::Sender<ActionEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(ActionEvent::notification(notification)) {
            tracing::debug!("notification dropped: {}", e);
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}
