//! Remote data service boundary: auth plus table CRUD
//!
//! The hosted backend is reached only through [`RemoteService`]. Wire shapes
//! live in [`records`]; everything above this module works with the typed
//! models.

pub mod memory;
pub mod records;

pub use memory::MemoryRemote;

use crate::core::types::{IdentityId, OrderId, OrderStatus};
use crate::models::{Identity, MenuItem, NewOrder, Order, OrderDetails, OrderLine, UserProfile};
use crate::Result;
use async_trait::async_trait;
use std::cmp::Ordering;

/// Calls the cart core needs from the hosted backend.
///
/// Every call may fail with [`crate::Error::Remote`] (or
/// [`crate::Error::Authentication`] for auth calls) carrying the backend's
/// message. "No such row" is `Ok(None)`, not an error.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Identity of the signed-in account, if any
    async fn current_identity(&self) -> Result<Option<Identity>>;

    /// Creates an account; does not sign it in
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Identity>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    async fn sign_out(&self) -> Result<()>;

    /// Inserts a row into `users`
    async fn insert_profile(&self, profile: UserProfile) -> Result<()>;

    /// Selects from `menu_items`
    async fn list_menu_items(&self, query: &MenuQuery) -> Result<Vec<MenuItem>>;

    /// The single order owned by `owner` in `status`, joined with its lines.
    ///
    /// More than one match is an error.
    async fn find_order(
        &self,
        owner: IdentityId,
        status: OrderStatus,
    ) -> Result<Option<OrderDetails>>;

    /// One order by id, joined with its lines
    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderDetails>>;

    /// Inserts into `orders` and returns the stored row
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;

    /// Deletes every `order_items` row of an order
    async fn delete_order_lines(&self, order_id: OrderId) -> Result<()>;

    /// Inserts rows into `order_items`
    async fn insert_order_lines(&self, lines: Vec<OrderLine>) -> Result<()>;
}

/// Column a menu listing can be ordered by (always ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSort {
    Category,
    Name,
}

/// Filter and ordering for a menu listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuQuery {
    pub only_available: bool,
    pub order_by: Vec<MenuSort>,
}

impl MenuQuery {
    /// What the storefront shows: available items by category, then name
    pub fn storefront() -> Self {
        Self {
            only_available: true,
            order_by: vec![MenuSort::Category, MenuSort::Name],
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        !self.only_available || item.is_available
    }

    /// Orders two items by the query's sort keys
    pub fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        self.order_by
            .iter()
            .map(|key| match key {
                MenuSort::Category => a.category.cmp(&b.category),
                MenuSort::Name => a.name.cmp(&b.name),
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl Default for MenuQuery {
    fn default() -> Self {
        Self::storefront()
    }
}
