//! Storefront menu listing

use crate::core::types::MenuItemId;
use crate::models::MenuItem;
use crate::remote::{MenuQuery, RemoteService};

use std::sync::Arc;

/// Loads the menu and keeps the last listing around
pub struct MenuManager {
    remote: Arc<dyn RemoteService>,
    fallback: Vec<MenuItem>,
    items: Vec<MenuItem>,
}

impl MenuManager {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        Self {
            remote,
            fallback: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Items served when the backend cannot be reached
    pub fn with_fallback(mut self, fallback: Vec<MenuItem>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Fetches the available items, by category then name.
    ///
    /// Falls back to the configured list when the fetch fails.
    pub async fn load_menu_items(&mut self) -> &[MenuItem] {
        self.items = match self.remote.list_menu_items(&MenuQuery::storefront()).await {
            Ok(items) => {
                log::debug!("Loaded {} menu items", items.len());
                items
            }
            Err(e) => {
                log::error!("Error loading menu items: {}", e);
                self.fallback.clone()
            }
        };
        &self.items
    }

    /// The last loaded listing
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, item_id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}
