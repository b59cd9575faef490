use crate::core::types::{IdentityId, OrderId, OrderStatus, PaymentStatus};
use crate::models::{CustomerDetails, Identity, OrderLineDetails};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an order record held by the remote data service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    /// Identifier assigned by the remote service
    pub id: OrderId,
    /// Human-readable order number; pending orders have none
    pub order_number: Option<String>,
    /// Current state of the order
    pub status: OrderStatus,
    /// Recorded payment state, if any
    pub payment_status: Option<PaymentStatus>,
    /// Payment method chosen at checkout
    pub payment_method: Option<String>,
    /// Sum of line totals before tax
    pub total_amount: Option<Decimal>,
    /// Tax charged on `total_amount`
    pub tax_amount: Option<Decimal>,
    /// Contact fields
    pub customer: CustomerDetails,
    /// Owning identity, `None` for guest checkouts
    pub user_id: Option<IdentityId>,
    /// Creation time as reported by the remote service
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Amount due including tax, when both parts are known
    pub fn grand_total(&self) -> Option<Decimal> {
        Some(self.total_amount? + self.tax_amount?)
    }
}

/// An order that has not been inserted yet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: Option<String>,
    pub status: OrderStatus,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
    pub total_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub customer: CustomerDetails,
    pub user_id: Option<IdentityId>,
}

impl NewOrder {
    /// The pending order that mirrors an identity's cart
    pub fn pending_for(identity: &Identity) -> Self {
        Self {
            order_number: None,
            status: OrderStatus::Pending,
            payment_status: None,
            payment_method: None,
            total_amount: None,
            tax_amount: None,
            customer: CustomerDetails::new().or_identity(Some(identity)),
            user_id: Some(identity.id),
        }
    }

    /// A checked-out order with payment recorded as completed
    pub fn confirmed(
        order_number: String,
        payment_method: String,
        total_amount: Decimal,
        tax_amount: Decimal,
        customer: CustomerDetails,
    ) -> Self {
        Self {
            order_number: Some(order_number),
            status: OrderStatus::Confirmed,
            payment_status: Some(PaymentStatus::Completed),
            payment_method: Some(payment_method),
            total_amount: Some(total_amount),
            tax_amount: Some(tax_amount),
            customer,
            user_id: None,
        }
    }

    /// Sets the owning identity
    pub fn with_owner(mut self, user_id: IdentityId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Materializes the order once the remote service has assigned an id
    pub fn into_order(self, id: OrderId, created_at: Option<DateTime<Utc>>) -> Order {
        Order {
            id,
            order_number: self.order_number,
            status: self.status,
            payment_status: self.payment_status,
            payment_method: self.payment_method,
            total_amount: self.total_amount,
            tax_amount: self.tax_amount,
            customer: self.customer,
            user_id: self.user_id,
            created_at,
        }
    }
}

/// An order with its lines and the menu items they reference
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLineDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_pending_order_prefills_customer() {
        let identity = Identity::new(Uuid::new_v4(), "asha@college.edu").with_full_name("Asha Rao");
        let order = NewOrder::pending_for(&identity);

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, Some(identity.id));
        assert_eq!(order.customer.name.as_deref(), Some("Asha Rao"));
        assert_eq!(order.customer.email.as_deref(), Some("asha@college.edu"));
        assert!(order.order_number.is_none());
    }

    #[test]
    fn test_confirmed_order_state() {
        let order = NewOrder::confirmed(
            "ORD-1-1".to_string(),
            "upi".to_string(),
            Decimal::from(175),
            Decimal::new(875, 2),
            CustomerDetails::new(),
        )
        .into_order(10, None);

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_status, Some(PaymentStatus::Completed));
        assert_eq!(order.grand_total(), Some(Decimal::new(18375, 2)));
        assert_eq!(order.user_id, None);
    }
}
