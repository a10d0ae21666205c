use crate::{Notification, NotificationKind};

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;

/// Receives orchestrator notifications.
///
/// Called while the lifecycle lock is held, so implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes every notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, notification: Notification) {
        let target = notification
            .target_client
            .as_ref()
            .map(|client| client.as_str())
            .unwrap_or("all");

        match notification.kind {
            NotificationKind::StartFailed
            | NotificationKind::TimedOut
            | NotificationKind::StopFailed => {
                warn!("[notify {}] {}", target, notification.kind)
            }
            _ => info!("[notify {}] {}", target, notification.kind),
        }
    }
}

/// Forwards notifications into a bounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    sender: mpsc::Sender<Notification>,
}

impl ChannelNotificationSink {
    pub fn new(sender: mpsc::Sender<Notification>) -> Self {
        Self { sender }
    }

    /// Sink plus the receiving end of a fresh channel
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }
}

impl NotificationSink for ChannelNotificationSink {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.try_send(notification) {
            warn!("Dropping notification: {}", e);
        }
    }
}

/// Delivers each notification to every inner sink, in order
#[derive(Default, Clone)]
pub struct FanoutNotificationSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for FanoutNotificationSink {
    fn notify(&self, notification: Notification) {
        for sink in &self.sinks {
            sink.notify(notification.clone());
        }
    }
}
