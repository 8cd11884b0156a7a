//! Core `adapters` crate for abstracting the collaborators of the auth layer.
//!
//! This crate defines the [`CredentialVerifier`] trait, the boundary behind
//! which a real identity service replaces the mocked credential check, and the
//! [`KeyValueStore`] trait modelling the durable side-store that mirrors the
//! current principal across restarts. Concrete implementations live in
//! [`mock`] and [`storage`].

pub mod errors;
pub mod mock;
pub mod models;
pub mod storage;

pub use errors::AdapterError;
pub use mock::MockVerifier;
pub use models::{Credentials, UnknownRole, User, UserRole};
pub use storage::{FileStore, MemoryStore};

use async_trait::async_trait;

/// Checks a credential pair against an identity provider.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Resolves to `Ok(Some(user))` when the pair is accepted and `Ok(None)`
    /// when it is rejected. `Err` is reserved for failures of the provider
    /// itself (unreachable, timed out), never for wrong credentials.
    async fn verify(&self, credentials: &Credentials) -> Result<Option<User>, AdapterError>;
}

/// String-keyed durable storage, shaped like browser local storage.
///
/// Writers are last-write-wins with no locking across processes. Two
/// processes sharing one backing file may interleave a read-modify-write and
/// lose an update; logins are human-paced so this is tolerated.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AdapterError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AdapterError>;
    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), AdapterError>;
}
