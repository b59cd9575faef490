//! Local device storage for guest carts

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::cart::Cart;
use crate::models::LineItem;
use crate::Result;

/// Synchronous string key/value storage on the local device
pub trait LocalStore: Send + Sync {
    /// Reads the value under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads the guest cart stored under `key`.
///
/// Absent, unreadable or malformed data all yield an empty cart; the cause is
/// logged.
pub fn load_guest_cart(store: &dyn LocalStore, key: &str) -> Cart {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            log::warn!("Failed to read guest cart: {}", e);
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<LineItem>>(&raw) {
        Ok(lines) => Cart::from_lines(lines),
        Err(e) => {
            log::warn!("Discarding malformed guest cart under {}: {}", key, e);
            Cart::new()
        }
    }
}

/// Overwrites the guest cart stored under `key` with the full cart
pub fn save_guest_cart(store: &dyn LocalStore, key: &str, cart: &Cart) -> Result<()> {
    let raw = serde_json::to_string(cart)?;
    store.set(key, &raw)
}
