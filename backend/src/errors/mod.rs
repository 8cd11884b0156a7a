//! Crate-level error type.
//!
//! Collects configuration and auth failures behind one enum for the binary.

use crate::auth::AuthError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("usage: {0}")]
    Usage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
