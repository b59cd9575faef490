//! In-memory cart: line bookkeeping and totals

use crate::core::types::{MenuItemId, TAX_RATE};
use crate::models::{LineItem, MenuItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered collection of line items, at most one line per item id
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored lines.
    ///
    /// Lines with a zero quantity are dropped and repeated ids are folded
    /// into the first occurrence, so stored data can never break the
    /// one-line-per-id invariant.
    pub fn from_lines(lines: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        cart.merge(lines);
        cart
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Looks up the line for an item
    pub fn get(&self, item_id: MenuItemId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id == item_id)
    }

    /// Adds one unit of the item, appending a new line on first add
    pub fn add_item(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(LineItem::from_menu_item(item)),
        }
    }

    /// Removes the item's line. Returns whether a line was removed.
    pub fn remove_item(&mut self, item_id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != item_id);
        self.lines.len() != before
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity of zero or below removes the line; an unknown id is left
    /// alone. Returns whether the cart changed.
    pub fn update_quantity(&mut self, item_id: MenuItemId, new_quantity: i64) -> bool {
        if new_quantity <= 0 {
            return self.remove_item(item_id);
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|line| line.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Folds lines into the cart, summing quantities for ids already present
    pub fn merge(&mut self, lines: impl IntoIterator<Item = LineItem>) {
        for incoming in lines.into_iter().filter(|line| line.quantity > 0) {
            match self.lines.iter_mut().find(|line| line.id == incoming.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(incoming.quantity),
                None => self.lines.push(incoming),
            }
        }
    }

    /// Empties the cart
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` across all lines
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Tax on the total price at the fixed rate
    pub fn tax(&self) -> Decimal {
        self.total_price() * TAX_RATE
    }

    /// Total price plus tax
    pub fn grand_total(&self) -> Decimal {
        self.total_price() + self.tax()
    }

    pub fn into_lines(self) -> Vec<LineItem> {
        self.lines
    }
}
