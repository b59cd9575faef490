//! Cart reconciler: the in-memory cart plus whichever backend persists it

use crate::config::{CartConfig, MergePolicy};
use crate::core::cart::Cart;
use crate::core::events::{self, CartEvent, EventSink};
use crate::core::session::Session;
use crate::core::sync::{load_pending_cart, SyncQueue};
use crate::core::types::MenuItemId;
use crate::models::{LineItem, MenuItem};
use crate::remote::RemoteService;
use crate::storage::{load_guest_cart, save_guest_cart, LocalStore};

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Owns the cart for one session and keeps it persisted.
///
/// Guests persist to local storage; authenticated identities persist to their
/// pending remote order. Mutations apply immediately; remote persistence runs
/// in the background and its failures never reach the caller.
pub struct CartManager {
    cart: Cart,
    session: Session,
    remote: Arc<dyn RemoteService>,
    local: Arc<dyn LocalStore>,
    config: CartConfig,
    events: EventSink,
    sync: SyncQueue,
}

impl CartManager {
    /// Creates a manager with an empty cart; call [`CartManager::load_cart`]
    /// to populate it
    pub fn new(
        session: Session,
        remote: Arc<dyn RemoteService>,
        local: Arc<dyn LocalStore>,
        config: CartConfig,
    ) -> Self {
        Self {
            cart: Cart::new(),
            session,
            remote,
            local,
            config,
            events: EventSink::disconnected(),
            sync: SyncQueue::new(),
        }
    }

    /// Routes cart events to a new receiver, replacing any previous one
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CartEvent> {
        let (sink, receiver) = events::channel();
        self.events = sink;
        receiver
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.lines()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Adds one unit of `item` and confirms it to the user
    pub fn add_item(&mut self, item: &MenuItem) {
        self.cart.add_item(item);
        self.save_cart();
        self.refresh_display();
        self.events.emit(CartEvent::ItemAdded {
            name: item.name.clone(),
        });
    }

    /// Removes the item's line; absent ids are not an error
    pub fn remove_item(&mut self, item_id: MenuItemId) {
        self.cart.remove_item(item_id);
        self.save_cart();
        self.refresh_display();
    }

    /// Sets an existing line's quantity; zero or below removes the line
    pub fn update_quantity(&mut self, item_id: MenuItemId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(item_id);
            return;
        }

        if self.cart.update_quantity(item_id, new_quantity) {
            self.save_cart();
            self.refresh_display();
        }
    }

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    pub fn tax(&self) -> Decimal {
        self.cart.tax()
    }

    pub fn grand_total(&self) -> Decimal {
        self.cart.grand_total()
    }

    /// Empties the cart and persists the empty state
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.save_cart();
        self.refresh_display();
    }

    /// Replaces the cart with the one persisted for the current session.
    ///
    /// Never fails: a missing, unreadable or unreachable cart loads as empty.
    pub async fn load_cart(&mut self) {
        self.cart = match self.session.current() {
            Some(identity) => match load_pending_cart(self.remote.as_ref(), &identity).await {
                Ok(cart) => cart,
                Err(e) => {
                    log::error!("Error loading cart: {}", e);
                    self.events.emit(CartEvent::SyncFailed {
                        message: e.message(),
                    });
                    Cart::new()
                }
            },
            None => load_guest_cart(self.local.as_ref(), &self.config.guest_cart_key),
        };
        self.refresh_display();
    }

    /// Persists the cart to the backend matching the current session.
    ///
    /// Guest carts are written to local storage before this returns; remote
    /// saves are dispatched in the background.
    pub fn save_cart(&mut self) {
        match self.session.current() {
            Some(identity) => self.sync.dispatch(
                self.remote.clone(),
                identity,
                self.cart.lines().to_vec(),
                self.events.clone(),
            ),
            None => {
                if let Err(e) =
                    save_guest_cart(self.local.as_ref(), &self.config.guest_cart_key, &self.cart)
                {
                    log::error!("Error saving guest cart: {}", e);
                    self.events.emit(CartEvent::SyncFailed {
                        message: e.message(),
                    });
                }
            }
        }
    }

    /// Waits for every background save dispatched so far
    pub async fn flush(&mut self) {
        self.sync.flush().await;
    }

    /// Number of background saves still running
    pub fn pending_saves(&self) -> usize {
        self.sync.in_flight()
    }

    /// Reloads after the session switched from guest to signed in.
    ///
    /// What happens to the guest cart depends on the configured
    /// [`MergePolicy`]. The guest copy in local storage is left untouched
    /// unless it was merged.
    pub async fn handle_sign_in(&mut self) {
        let guest = std::mem::take(&mut self.cart);
        self.load_cart().await;

        match self.config.merge_policy {
            MergePolicy::DiscardGuest => {
                if !guest.is_empty() {
                    log::info!(
                        "Signed in with {} guest items; using the saved cart instead",
                        guest.total_items()
                    );
                }
            }
            MergePolicy::SumQuantities => {
                if guest.is_empty() {
                    return;
                }
                self.cart.merge(guest.into_lines());
                self.save_cart();
                self.refresh_display();
                if let Err(e) = self.local.remove(&self.config.guest_cart_key) {
                    log::warn!("Failed to clear merged guest cart: {}", e);
                }
            }
        }
    }

    /// Reloads after the session switched to guest.
    ///
    /// Outstanding remote saves finish first so they are not lost.
    pub async fn handle_sign_out(&mut self) {
        self.flush().await;
        self.load_cart().await;
    }

    fn refresh_display(&self) {
        self.events.emit(CartEvent::Updated {
            total_items: self.cart.total_items(),
        });
    }
}
