mod customer;
mod identity;
mod item;
mod line_item;
mod order;
mod order_line;

pub use customer::CustomerDetails;
pub use identity::{Identity, UserProfile};
pub use item::MenuItem;
pub use line_item::LineItem;
pub use order::{NewOrder, Order, OrderDetails};
pub use order_line::{OrderLine, OrderLineDetails};
