//! Outcome channel between the cart core and whatever renders it

use crate::core::types::OrderId;
use tokio::sync::mpsc;

/// Something the presentation layer may want to reflect
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// An item was added; carries the item name for the confirmation toast
    ItemAdded { name: String },
    /// The cart changed; carries the new badge count
    Updated { total_items: u64 },
    /// A background save reached the remote pending order
    Synced { order_id: OrderId },
    /// A background save or load failed; the cart itself is unaffected
    SyncFailed { message: String },
}

/// Creates a connected sink/receiver pair
pub fn channel() -> (EventSink, mpsc::UnboundedReceiver<CartEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (EventSink::new(sender), receiver)
}

/// Sending half of the event channel. A disconnected sink drops events.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<CartEvent>>,
}

impl EventSink {
    pub fn new(sender: mpsc::UnboundedSender<CartEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// A sink with no receiver
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: CartEvent) {
        if let Some(sender) = &self.sender {
            if sender.send(event).is_err() {
                log::debug!("Cart event receiver dropped");
            }
        }
    }
}
