use crate::models::Identity;
use serde::{Deserialize, Serialize};

/// Contact fields recorded on an order
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerDetails {
    /// Creates empty customer details
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the customer name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the customer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the customer phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Fills missing name and email from the identity's profile.
    ///
    /// Explicit values always win; the phone is never filled in.
    pub fn or_identity(mut self, identity: Option<&Identity>) -> Self {
        if let Some(identity) = identity {
            if self.name.is_none() {
                self.name = identity.full_name.clone();
            }
            if self.email.is_none() {
                self.email = Some(identity.email.clone());
            }
        }
        self
    }
}
