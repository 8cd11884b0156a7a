//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to an identity
//! provider or reading and writing the durable side-store, giving the session
//! layer one error type for every collaborator it depends on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("storage error: {0}")]
    StorageError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl AdapterError {
    /// Whether retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AdapterError::ProviderUnavailable(_))
    }
}
