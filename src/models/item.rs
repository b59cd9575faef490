use crate::core::types::MenuItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a dish or drink on the canteen menu
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Unique identifier for the item
    pub id: MenuItemId,
    /// Display name of the item
    pub name: String,
    /// Optional description of the item
    pub description: Option<String>,
    /// Current catalog price
    pub price: Decimal,
    /// Optional image shown on the menu card
    pub image_url: Option<String>,
    /// Menu section (e.g. "Snacks", "Beverages")
    pub category: String,
    /// Whether the item can currently be ordered
    pub is_available: bool,
}

impl MenuItem {
    /// Creates a new available MenuItem with required fields
    pub fn new(id: MenuItemId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            image_url: None,
            category: String::new(),
            is_available: true,
        }
    }

    /// Sets the description of the item
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image of the item
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets the menu section of the item
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Marks the item as not orderable
    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}
