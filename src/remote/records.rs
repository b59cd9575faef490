//! Row shapes as the hosted backend stores and returns them
//!
//! Column names here follow the backend schema (`customer_name`,
//! `menu_item_id`, nested `order_items` / `menu_items` on joined selects).
//! Conversions to and from the crate models are the only place that knows
//! about them.

use crate::core::error::Error;
use crate::core::types::{IdentityId, MenuItemId, OrderId, OrderStatus, PaymentStatus};
use crate::models::{
    CustomerDetails, MenuItem, NewOrder, Order, OrderDetails, OrderLine, OrderLineDetails,
    UserProfile,
};
use crate::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Row of `menu_items`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuItemRecord {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Row of `users`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: IdentityId,
    pub email: String,
    pub full_name: String,
}

/// Row of `orders`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub tax_amount: Option<Decimal>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub user_id: Option<IdentityId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for `orders`; unset columns are left to their defaults
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewOrderRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<IdentityId>,
}

/// Row of `order_items`, optionally joined with its `menu_items` row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub order_id: OrderId,
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_items: Option<MenuItemRecord>,
}

/// Result of `select *, order_items(*, menu_items(*))` on `orders`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderWithItemsRecord {
    #[serde(flatten)]
    pub order: OrderRecord,
    #[serde(default)]
    pub order_items: Vec<OrderItemRecord>,
}

impl From<MenuItemRecord> for MenuItem {
    fn from(record: MenuItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            image_url: record.image_url,
            category: record.category.unwrap_or_default(),
            is_available: record.is_available.unwrap_or(true),
        }
    }
}

impl From<&MenuItem> for MenuItemRecord {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            category: Some(item.category.clone()),
            is_available: Some(item.is_available),
        }
    }
}

impl From<UserProfile> for UserRecord {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = Error;

    fn try_from(record: OrderRecord) -> Result<Self> {
        let status = OrderStatus::from_str(&record.status).ok_or_else(|| {
            Error::InvalidData(format!(
                "Unknown status {:?} on order {}",
                record.status, record.id
            ))
        })?;

        let payment_status = match record.payment_status.as_deref() {
            None => None,
            Some(s) => Some(PaymentStatus::from_str(s).ok_or_else(|| {
                Error::InvalidData(format!(
                    "Unknown payment status {:?} on order {}",
                    s, record.id
                ))
            })?),
        };

        Ok(Order {
            id: record.id,
            order_number: record.order_number,
            status,
            payment_status,
            payment_method: record.payment_method,
            total_amount: record.total_amount,
            tax_amount: record.tax_amount,
            customer: CustomerDetails {
                name: record.customer_name,
                email: record.customer_email,
                phone: record.customer_phone,
            },
            user_id: record.user_id,
            created_at: record.created_at,
        })
    }
}

impl From<NewOrder> for NewOrderRecord {
    fn from(order: NewOrder) -> Self {
        Self {
            order_number: order.order_number,
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.map(|s| s.as_str().to_string()),
            payment_method: order.payment_method,
            total_amount: order.total_amount,
            tax_amount: order.tax_amount,
            customer_name: order.customer.name,
            customer_email: order.customer.email,
            customer_phone: order.customer.phone,
            user_id: order.user_id,
        }
    }
}

impl NewOrderRecord {
    /// The row the backend stores once it assigns an id and timestamp
    pub fn into_record(self, id: OrderId, created_at: DateTime<Utc>) -> OrderRecord {
        OrderRecord {
            id,
            order_number: self.order_number,
            status: self.status,
            payment_status: self.payment_status,
            payment_method: self.payment_method,
            total_amount: self.total_amount,
            tax_amount: self.tax_amount,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            user_id: self.user_id,
            created_at: Some(created_at),
        }
    }
}

impl From<&OrderLine> for OrderItemRecord {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: None,
            order_id: line.order_id,
            menu_item_id: line.menu_item_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
            menu_items: None,
        }
    }
}

impl From<OrderItemRecord> for OrderLineDetails {
    fn from(record: OrderItemRecord) -> Self {
        Self {
            line: OrderLine {
                order_id: record.order_id,
                menu_item_id: record.menu_item_id,
                quantity: record.quantity,
                unit_price: record.unit_price,
                total_price: record.total_price,
            },
            menu_item: record.menu_items.map(MenuItem::from),
        }
    }
}

impl TryFrom<OrderWithItemsRecord> for OrderDetails {
    type Error = Error;

    fn try_from(record: OrderWithItemsRecord) -> Result<Self> {
        Ok(OrderDetails {
            order: Order::try_from(record.order)?,
            lines: record
                .order_items
                .into_iter()
                .map(OrderLineDetails::from)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identity, LineItem};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_joined_select_maps_to_details() {
        let body = json!({
            "id": 12,
            "order_number": null,
            "status": "pending",
            "customer_name": "Asha Rao",
            "customer_email": "asha@college.edu",
            "user_id": "6f1c1b1e-8a51-4a3b-9d55-0e1f3f0d2a10",
            "created_at": "2025-11-06T09:30:00Z",
            "order_items": [
                {
                    "id": 3,
                    "order_id": 12,
                    "menu_item_id": 1,
                    "quantity": 2,
                    "unit_price": 80,
                    "total_price": 160,
                    "menu_items": {
                        "id": 1,
                        "name": "Paneer Butter Masala",
                        "price": 85,
                        "category": "Main Course",
                        "is_available": true
                    }
                }
            ]
        });

        let record: OrderWithItemsRecord = serde_json::from_value(body).unwrap();
        let details = OrderDetails::try_from(record).unwrap();

        assert_eq!(details.order.id, 12);
        assert_eq!(details.order.status, OrderStatus::Pending);
        assert_eq!(details.order.customer.name.as_deref(), Some("Asha Rao"));
        assert_eq!(details.lines.len(), 1);

        let line = LineItem::from_order_line(&details.lines[0]);
        assert_eq!(line.name, "Paneer Butter Masala");
        // snapshotted price, not the current catalog price
        assert_eq!(line.unit_price, Decimal::from(80));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_unknown_status_is_invalid_data() {
        let record: OrderRecord = serde_json::from_value(json!({
            "id": 1,
            "status": "shipped"
        }))
        .unwrap();

        assert!(matches!(Order::try_from(record), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_new_order_payload_omits_unset_columns() {
        let identity = Identity::new(Uuid::new_v4(), "asha@college.edu");
        let record = NewOrderRecord::from(NewOrder::pending_for(&identity));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["status"], "pending");
        assert_eq!(value["customer_email"], "asha@college.edu");
        assert!(value.get("order_number").is_none());
        assert!(value.get("customer_name").is_none());
    }
}
