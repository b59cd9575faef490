use crate::core::types::{MenuItemId, OrderId};
use crate::models::{LineItem, MenuItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted order line, snapshotted from the cart
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Order this line belongs to
    pub order_id: OrderId,
    /// Menu item the line refers to (lookup only)
    pub menu_item_id: MenuItemId,
    /// Quantity ordered
    pub quantity: u32,
    /// Unit price captured when the line was written
    pub unit_price: Decimal,
    /// `unit_price * quantity`
    pub total_price: Decimal,
}

impl OrderLine {
    /// Creates a new OrderLine, computing the line total
    pub fn new(
        order_id: OrderId,
        menu_item_id: MenuItemId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            order_id,
            menu_item_id,
            quantity,
            unit_price,
            total_price: unit_price * Decimal::from(quantity),
        }
    }

    /// Snapshots a cart line under the given order
    pub fn snapshot(order_id: OrderId, line: &LineItem) -> Self {
        Self::new(order_id, line.id, line.quantity, line.unit_price)
    }
}

/// An order line joined with the menu item it references
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderLineDetails {
    pub line: OrderLine,
    /// `None` when the menu item no longer exists
    pub menu_item: Option<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_captures_price() {
        let mut item = MenuItem::new(1, "Paneer Butter Masala", Decimal::from(80));
        let mut line = LineItem::from_menu_item(&item);
        line.quantity = 2;

        let snapshot = OrderLine::snapshot(42, &line);
        item.price = Decimal::from(95);

        assert_eq!(snapshot.order_id, 42);
        assert_eq!(snapshot.unit_price, Decimal::from(80));
        assert_eq!(snapshot.total_price, Decimal::from(160));
    }
}
