use crate::core::types::IdentityId;
use serde::{Deserialize, Serialize};

/// An authenticated account as reported by the remote auth service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
    /// Name collected at sign-up, if any
    pub full_name: Option<String>,
}

impl Identity {
    /// Creates a new Identity
    pub fn new(id: IdentityId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: None,
        }
    }

    /// Sets the full name of the identity
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Name to greet the user with: full name, or the email when unset
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// Profile row stored in the `users` table alongside the auth account
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: IdentityId,
    pub email: String,
    pub full_name: String,
}

impl UserProfile {
    /// Creates the profile matching a freshly signed-up identity
    pub fn for_identity(identity: &Identity, full_name: impl Into<String>) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            full_name: full_name.into(),
        }
    }
}
