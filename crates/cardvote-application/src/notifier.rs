//! Channel-backed [`Notifier`].

use cardvote_core::notification::{Notification, Notifier};
use tokio::sync::mpsc;

/// Forwards notifications to an unbounded channel drained by the presentation layer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::debug!("Notification dropped, receiver gone: {}", e.0.detail);
        }
    }
}
