//! Storefront-facing managers over the cart core

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod menu;

pub use auth::{AuthManager, AuthResult};
pub use cart::CartManager;
pub use checkout::{CheckoutResult, OrderManager};
pub use menu::MenuManager;
