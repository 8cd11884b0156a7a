//! Data structures for authentication-related entities.
//!
//! The principal and role types are owned by the adapters crate, since they
//! cross the identity-provider and storage boundaries; they are re-exported
//! here next to the session tuple.

pub use nagari_adapters::{Credentials, UnknownRole, User, UserRole};

/// Snapshot of the session tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthState {
    /// Derived, never stored.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    /// Loading until [`SessionManager::initialize`](super::SessionManager::initialize)
    /// has looked at the store.
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}
