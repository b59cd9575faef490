//! Core cart logic and data structures

pub mod cart;
pub mod error;
pub mod events;
pub mod order;
pub mod session;
pub mod sync;
pub mod types;
