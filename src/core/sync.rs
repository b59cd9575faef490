//! Mirroring the cart into the identity's pending order

use crate::core::cart::Cart;
use crate::core::events::{CartEvent, EventSink};
use crate::core::types::{OrderId, OrderStatus};
use crate::models::{Identity, LineItem, NewOrder, OrderLine};
use crate::remote::RemoteService;
use crate::Result;

use futures::future::join_all;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Replaces the lines of the identity's pending order with `lines`.
///
/// Creates the pending order first when there is none. Full delete and
/// re-insert, no diffing. Returns the pending order's id.
pub async fn save_pending_order(
    remote: &dyn RemoteService,
    identity: &Identity,
    lines: &[LineItem],
) -> Result<OrderId> {
    let order_id = match remote.find_order(identity.id, OrderStatus::Pending).await? {
        Some(details) => details.order.id,
        None => {
            let order = remote.insert_order(NewOrder::pending_for(identity)).await?;
            log::debug!("Created pending order {} for {}", order.id, identity.id);
            order.id
        }
    };

    remote.delete_order_lines(order_id).await?;

    if !lines.is_empty() {
        let snapshot = lines
            .iter()
            .map(|line| OrderLine::snapshot(order_id, line))
            .collect();
        remote.insert_order_lines(snapshot).await?;
    }

    Ok(order_id)
}

/// Rebuilds a cart from the identity's pending order; empty when there is none
pub async fn load_pending_cart(remote: &dyn RemoteService, identity: &Identity) -> Result<Cart> {
    let details = remote.find_order(identity.id, OrderStatus::Pending).await?;

    Ok(match details {
        Some(details) => Cart::from_lines(
            details
                .lines
                .iter()
                .map(LineItem::from_order_line)
                .collect(),
        ),
        None => Cart::new(),
    })
}

/// Background saves that have been dispatched but not yet awaited.
///
/// Saves run one at a time in dispatch order, so the last dispatched snapshot
/// is the one left in the pending order and only one pending order is ever
/// created.
#[derive(Debug, Default)]
pub struct SyncQueue {
    in_flight: Vec<JoinHandle<()>>,
    /// Resolves once the most recently dispatched save has finished
    tail: Option<oneshot::Receiver<()>>,
}

impl SyncQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a save of `lines` to the identity's pending order.
    ///
    /// The outcome is logged and reported on `events`; it is never returned.
    pub fn dispatch(
        &mut self,
        remote: Arc<dyn RemoteService>,
        identity: Identity,
        lines: Vec<LineItem>,
        events: EventSink,
    ) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Cannot save cart outside a tokio runtime: {}", e);
                events.emit(CartEvent::SyncFailed {
                    message: e.to_string(),
                });
                return;
            }
        };

        let (done, finished) = oneshot::channel();
        let previous = self.tail.replace(finished);

        let handle = runtime.spawn(async move {
            if let Some(previous) = previous {
                // an Err only means the previous save's task went away
                let _ = previous.await;
            }

            match save_pending_order(remote.as_ref(), &identity, &lines).await {
                Ok(order_id) => {
                    log::debug!("Saved {} cart lines to order {}", lines.len(), order_id);
                    events.emit(CartEvent::Synced { order_id });
                }
                Err(e) => {
                    log::error!("Error saving cart to database: {}", e);
                    events.emit(CartEvent::SyncFailed {
                        message: e.message(),
                    });
                }
            }
            let _ = done.send(());
        });
        self.in_flight.push(handle);
    }

    /// Number of saves not yet known to be finished
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Waits for every dispatched save to finish
    pub async fn flush(&mut self) {
        let handles = std::mem::take(&mut self.in_flight);
        self.tail = None;
        for result in join_all(handles).await {
            if let Err(e) = result {
                log::error!("Cart save task failed: {}", e);
            }
        }
    }
}
