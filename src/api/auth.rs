//! Account sign up, sign in and sign out

use crate::api::cart::CartManager;
use crate::core::session::Session;
use crate::models::{Identity, UserProfile};
use crate::remote::RemoteService;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of an auth action, shaped for display
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
}

impl AuthResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Keeps the session in step with the backend's auth state
pub struct AuthManager {
    remote: Arc<dyn RemoteService>,
    session: Session,
}

impl AuthManager {
    pub fn new(remote: Arc<dyn RemoteService>, session: Session) -> Self {
        Self { remote, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Adopts whatever identity the backend already holds.
    ///
    /// A failed lookup is treated as signed out.
    pub async fn check_auth_state(&self) -> Option<Identity> {
        let identity = match self.remote.current_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("Error checking auth state: {}", e);
                None
            }
        };
        self.session.set(identity.clone());
        identity
    }

    /// Creates an account plus its `users` profile row.
    ///
    /// The account is not signed in. A failed profile insert is logged and
    /// does not fail the sign up.
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> AuthResult {
        let identity = match self.remote.sign_up(email, password, full_name).await {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("Sign up error: {}", e);
                return AuthResult::failed(e.message());
            }
        };

        let profile = UserProfile::for_identity(&identity, full_name);
        if let Err(e) = self.remote.insert_profile(profile).await {
            log::error!("Error creating user profile for {}: {}", identity.id, e);
        }

        log::info!("Created account {}", identity.id);
        AuthResult::ok("Account created successfully! Please check your email to verify your account.")
    }

    /// Signs in and swaps the cart over to the account's pending order
    pub async fn sign_in(&self, cart: &mut CartManager, email: &str, password: &str) -> AuthResult {
        let identity = match self.remote.sign_in(email, password).await {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("Sign in error: {}", e);
                return AuthResult::failed(e.message());
            }
        };

        log::info!("Signed in as {} ({})", identity.display_name(), identity.id);
        self.session.set(Some(identity));
        cart.handle_sign_in().await;
        AuthResult::ok("Login successful!")
    }

    /// Signs out and swaps the cart back to the guest copy.
    ///
    /// The session is left as it was when the backend refuses.
    pub async fn sign_out(&self, cart: &mut CartManager) -> AuthResult {
        if let Err(e) = self.remote.sign_out().await {
            log::error!("Sign out error: {}", e);
            return AuthResult::failed(e.message());
        }

        self.session.set(None);
        cart.handle_sign_out().await;
        AuthResult::ok("Signed out")
    }
}
