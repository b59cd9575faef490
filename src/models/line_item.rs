use crate::core::types::MenuItemId;
use crate::models::{MenuItem, OrderLineDetails};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One (item, quantity) pair in the cart
///
/// The serialized form is what guest carts keep in local storage, so the unit
/// price is stored under `price`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Menu item this line refers to
    pub id: MenuItemId,
    /// Item name at the time it was added
    pub name: String,
    /// Unit price at the time it was added
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    /// Always at least 1; a line that would drop to 0 is removed instead
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LineItem {
    /// Creates a line with quantity 1 from a menu item
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            image_url: item.image_url.clone(),
            description: item.description.clone(),
        }
    }

    /// Rebuilds a cart line from a persisted order line.
    ///
    /// The price is the snapshotted one, not the live catalog price.
    pub fn from_order_line(details: &OrderLineDetails) -> Self {
        let line = &details.line;
        let (name, image_url, description) = match &details.menu_item {
            Some(item) => (
                item.name.clone(),
                item.image_url.clone(),
                item.description.clone(),
            ),
            None => (format!("Item {}", line.menu_item_id), None, None),
        };

        Self {
            id: line.menu_item_id,
            name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            image_url,
            description,
        }
    }

    /// Unit price multiplied by quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderLine;

    #[test]
    fn test_line_from_menu_item() {
        let item = MenuItem::new(1, "Paneer Butter Masala", Decimal::from(80))
            .with_image_url("https://img.example/paneer.jpg");
        let mut line = LineItem::from_menu_item(&item);
        line.quantity = 2;

        assert_eq!(line.id, 1);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Decimal::from(160));
        assert_eq!(line.image_url.as_deref(), Some("https://img.example/paneer.jpg"));
    }

    #[test]
    fn test_guest_storage_shape() {
        let line = LineItem::from_menu_item(&MenuItem::new(9, "Masala Chai", Decimal::from(15)));
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["id"], 9);
        assert_eq!(json["price"], "15");
        assert_eq!(json["quantity"], 1);
        assert!(json.get("image_url").is_none());

        // numbers written by other clients are accepted as well
        let parsed: LineItem =
            serde_json::from_str(r#"{"id":9,"name":"Masala Chai","price":15,"quantity":3}"#)
                .unwrap();
        assert_eq!(parsed.unit_price, Decimal::from(15));
        assert_eq!(parsed.quantity, 3);
    }

    #[test]
    fn test_line_from_order_line_without_menu_item() {
        let details = OrderLineDetails {
            line: OrderLine::new(7, 4, 2, Decimal::from(55)),
            menu_item: None,
        };
        let line = LineItem::from_order_line(&details);

        assert_eq!(line.id, 4);
        assert_eq!(line.name, "Item 4");
        assert_eq!(line.unit_price, Decimal::from(55));
        assert_eq!(line.quantity, 2);
    }
}
