//! Session context: who, if anyone, is signed in

use crate::models::Identity;
use std::sync::{Arc, RwLock};

/// Shared handle to the current identity.
///
/// Cloning yields another handle to the same session. The lock is never held
/// across an await point.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Arc<RwLock<Option<Identity>>>,
}

impl Session {
    /// Creates a guest session
    pub fn guest() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as `identity`
    pub fn signed_in(identity: Identity) -> Self {
        let session = Self::default();
        session.set(Some(identity));
        session
    }

    /// Snapshot of the current identity
    pub fn current(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the current identity
    pub fn set(&self, identity: Option<Identity>) {
        let mut guard = self
            .identity
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = identity;
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_clones_share_identity() {
        let session = Session::guest();
        let other = session.clone();
        assert!(!other.is_authenticated());

        let identity = Identity::new(Uuid::new_v4(), "asha@college.edu");
        session.set(Some(identity.clone()));
        assert_eq!(other.current(), Some(identity));

        other.set(None);
        assert!(!session.is_authenticated());
    }
}
