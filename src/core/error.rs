//! Custom error types for the cart and order core

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Checkout was attempted with no lines in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// The remote data service rejected or failed a call
    #[error("Remote error: {0}")]
    Remote(String),

    /// Authentication or authorization failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local device storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid data or parameter
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    /// The bare message carried by the error, without its category prefix.
    ///
    /// Checkout and auth results hand this to the presentation layer.
    pub fn message(&self) -> String {
        match self {
            Error::EmptyCart => "Cart is empty".to_string(),
            Error::Remote(msg)
            | Error::Authentication(msg)
            | Error::Storage(msg)
            | Error::InvalidData(msg)
            | Error::Config(msg)
            | Error::Other(msg) => msg.clone(),
            Error::Serialization(e) => e.to_string(),
            Error::Io(e) => e.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_category() {
        let err = Error::Remote("duplicate key value".to_string());
        assert_eq!(err.to_string(), "Remote error: duplicate key value");
        assert_eq!(err.message(), "duplicate key value");
        assert_eq!(Error::EmptyCart.message(), "Cart is empty");
    }
}
