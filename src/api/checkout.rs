//! Checkout and order lookup

use crate::api::cart::CartManager;
use crate::core::error::Error;
use crate::core::order::{build_checkout_order, generate_order_number};
use crate::core::session::Session;
use crate::core::types::OrderId;
use crate::models::{CustomerDetails, OrderDetails, OrderLine};
use crate::remote::RemoteService;
use crate::Result;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a checkout, shaped for display
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CheckoutResult {
    pub success: bool,
    /// Failure reason; `None` on success
    pub message: Option<String>,
    pub order_number: Option<String>,
    pub order_id: Option<OrderId>,
}

impl CheckoutResult {
    fn placed(order_number: String, order_id: OrderId) -> Self {
        Self {
            success: true,
            message: None,
            order_number: Some(order_number),
            order_id: Some(order_id),
        }
    }

    fn failed(error: &Error) -> Self {
        Self {
            success: false,
            message: Some(error.message()),
            order_number: None,
            order_id: None,
        }
    }
}

/// Turns carts into confirmed orders
pub struct OrderManager {
    remote: Arc<dyn RemoteService>,
    session: Session,
}

impl OrderManager {
    /// Creates a new OrderManager
    pub fn new(remote: Arc<dyn RemoteService>, session: Session) -> Self {
        Self { remote, session }
    }

    /// Checks out the cart as a confirmed, paid order.
    ///
    /// On success the cart is cleared. Any failure leaves the cart untouched
    /// and is reported in the result rather than returned as an error.
    pub async fn create_order(
        &self,
        cart: &mut CartManager,
        payment_method: &str,
        customer: CustomerDetails,
    ) -> CheckoutResult {
        // earlier saves must land before the post-checkout empty cart does
        cart.flush().await;

        match self.place_order(cart, payment_method, customer).await {
            Ok((order_number, order_id)) => {
                log::info!("Placed order {} ({})", order_number, order_id);
                cart.clear_cart();
                CheckoutResult::placed(order_number, order_id)
            }
            Err(e) => {
                log::error!("Error creating order: {}", e);
                CheckoutResult::failed(&e)
            }
        }
    }

    async fn place_order(
        &self,
        cart: &CartManager,
        payment_method: &str,
        customer: CustomerDetails,
    ) -> Result<(String, OrderId)> {
        let identity = self.session.current();
        let order_number = generate_order_number(&cart.config().order_number_prefix);
        let new_order = build_checkout_order(
            cart.cart(),
            order_number.clone(),
            payment_method,
            customer,
            identity.as_ref(),
        )?;

        let order = self.remote.insert_order(new_order).await?;

        let lines = cart
            .items()
            .iter()
            .map(|line| OrderLine::snapshot(order.id, line))
            .collect();
        self.remote.insert_order_lines(lines).await?;

        Ok((order_number, order.id))
    }

    /// One order with its lines and menu items; `None` when missing or on error
    pub async fn get_order_details(&self, order_id: OrderId) -> Option<OrderDetails> {
        match self.remote.get_order(order_id).await {
            Ok(details) => details,
            Err(e) => {
                log::error!("Error fetching order details: {}", e);
                None
            }
        }
    }
}
