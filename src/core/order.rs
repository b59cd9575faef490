//! Checkout order construction

use crate::core::cart::Cart;
use crate::core::error::Error;
use crate::models::{CustomerDetails, Identity, NewOrder};
use crate::Result;

use chrono::Utc;
use rand::Rng;

/// Upper bound (exclusive) of the random order number suffix
const ORDER_SUFFIX_RANGE: u32 = 1000;

/// Generates a human-readable order number: `<prefix>-<unix millis>-<0..999>`.
///
/// There is no global sequence; two checkouts in the same millisecond can
/// collide with probability 1/1000.
pub fn generate_order_number(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..ORDER_SUFFIX_RANGE);
    format!("{}-{}-{}", prefix, millis, suffix)
}

/// Builds the confirmed order for a checkout of `cart`.
///
/// Fails with [`Error::EmptyCart`] when there is nothing to order. Customer
/// fields not given explicitly come from the identity's profile.
pub fn build_checkout_order(
    cart: &Cart,
    order_number: String,
    payment_method: &str,
    customer: CustomerDetails,
    identity: Option<&Identity>,
) -> Result<NewOrder> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    let order = NewOrder::confirmed(
        order_number,
        payment_method.to_string(),
        cart.total_price(),
        cart.tax(),
        customer.or_identity(identity),
    );

    Ok(match identity {
        Some(identity) => order.with_owner(identity.id),
        None => order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderStatus, PaymentStatus};
    use crate::models::MenuItem;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number("ORD");
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert!(parts[2].parse::<u32>().unwrap() < ORDER_SUFFIX_RANGE);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let result = build_checkout_order(
            &Cart::new(),
            "ORD-1-1".to_string(),
            "cash",
            CustomerDetails::new(),
            None,
        );
        assert!(matches!(result, Err(Error::EmptyCart)));
    }

    #[test]
    fn test_checkout_order_totals_and_owner() {
        let mut cart = Cart::new();
        cart.add_item(&MenuItem::new(1, "Paneer Butter Masala", Decimal::from(80)));
        cart.add_item(&MenuItem::new(1, "Paneer Butter Masala", Decimal::from(80)));
        cart.add_item(&MenuItem::new(9, "Masala Chai", Decimal::from(15)));
        let identity = Identity::new(Uuid::new_v4(), "asha@college.edu").with_full_name("Asha Rao");

        let order = build_checkout_order(
            &cart,
            "ORD-1-1".to_string(),
            "upi",
            CustomerDetails::new().with_phone("98450 00000"),
            Some(&identity),
        )
        .unwrap();

        assert_eq!(order.total_amount, Some(Decimal::from(175)));
        assert_eq!(order.tax_amount, Some(Decimal::new(875, 2)));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_status, Some(PaymentStatus::Completed));
        assert_eq!(order.payment_method.as_deref(), Some("upi"));
        assert_eq!(order.user_id, Some(identity.id));
        assert_eq!(order.customer.name.as_deref(), Some("Asha Rao"));
        assert_eq!(order.customer.phone.as_deref(), Some("98450 00000"));
    }
}
