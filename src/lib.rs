pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod remote;
pub mod storage;

/// Re-export important types for easier access
pub use crate::models::{
    CustomerDetails, Identity, LineItem, MenuItem, NewOrder, Order, OrderDetails, OrderLine,
};

pub use crate::api::{AuthManager, CartManager, MenuManager, OrderManager};
pub use crate::config::{CartConfig, MergePolicy};
pub use crate::core::error::Error;
pub use crate::core::session::Session;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
