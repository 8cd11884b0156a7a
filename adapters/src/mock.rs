//! Mocked identity provider.
//!
//! Accepts exactly one hardcoded identifier/secret pair and answers after a
//! fixed artificial delay, so callers keep the asynchronous contract a real
//! network-backed provider would impose.

use crate::errors::AdapterError;
use crate::models::{Credentials, User, UserRole};
use crate::CredentialVerifier;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub const ADMIN_EMAIL: &str = "admin@nagari.id";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// The principal handed out for the accepted credential pair.
pub fn admin_user() -> User {
    User {
        id: "1".to_string(),
        name: "Admin Nagari".to_string(),
        email: ADMIN_EMAIL.to_string(),
        role: UserRole::SuperAdmin,
    }
}

#[derive(Debug)]
pub struct MockVerifier {
    delay: Duration,
    unavailable: AtomicBool,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Makes subsequent checks fail as if the provider were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl Default for MockVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialVerifier for MockVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<Option<User>, AdapterError> {
        tokio::time::sleep(self.delay).await;

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AdapterError::ProviderUnavailable(
                "simulated network failure".to_string(),
            ));
        }

        if credentials.identifier == ADMIN_EMAIL && credentials.secret == ADMIN_PASSWORD {
            tracing::debug!(identifier = %credentials.identifier, "mock provider accepted credentials");
            Ok(Some(admin_user()))
        } else {
            tracing::debug!(identifier = %credentials.identifier, "mock provider rejected credentials");
            Ok(None)
        }
    }
}
