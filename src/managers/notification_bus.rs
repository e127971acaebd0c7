//! Fan-out of UI notifications.
//!
//! Delivery is fire-and-forget and at most once: a subscriber only sees
//! notifications published after it subscribed. Late subscribers read the
//! registry's cached tab state first, then consume deltas from here.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::types::notification::Notification;

#[derive(Debug, Default)]
pub struct NotificationBus {
    subscribers: Vec<UnboundedSender<Notification>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<Notification> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `notification` to every live subscriber and forgets closed ones.
    /// Never blocks.
    pub fn publish(&mut self, notification: &Notification) {
        self.subscribers
            .retain(|tx| tx.send(notification.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
