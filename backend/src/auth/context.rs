//! Explicit auth context.
//!
//! Consumers receive an [`AuthContext`] by value or reference and read the
//! session through it. Reading before a manager is installed is a wiring
//! mistake and fails loudly with [`AuthError::ContextNotInstalled`]; there
//! are no silent defaults. Each context is independent, so tests can run
//! many side by side.

use super::errors::AuthError;
use super::models::AuthState;
use super::service::SessionManager;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Default)]
pub struct AuthContext {
    session: OnceLock<Arc<SessionManager>>,
}

impl AuthContext {
    /// An empty context; install a manager before handing it to consumers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with `manager` already installed.
    pub fn with_session(manager: Arc<SessionManager>) -> Self {
        let context = Self::new();
        // A fresh OnceLock cannot already be set.
        let _ = context.session.set(manager);
        context
    }

    /// Installs the manager once. A second install is refused.
    pub fn install(&self, manager: Arc<SessionManager>) -> Result<(), AuthError> {
        self.session
            .set(manager)
            .map_err(|_| AuthError::ContextAlreadyInstalled)
    }

    pub fn is_installed(&self) -> bool {
        self.session.get().is_some()
    }

    pub fn session(&self) -> Result<Arc<SessionManager>, AuthError> {
        self.session
            .get()
            .cloned()
            .ok_or(AuthError::ContextNotInstalled)
    }

    /// Snapshot of the installed session's state.
    pub fn state(&self) -> Result<AuthState, AuthError> {
        Ok(self.session()?.state())
    }
}
