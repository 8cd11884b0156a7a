//! Authentication and session layer of the Nagari public-information portal.
//!
//! - [`auth`]: roles, route access policy, token codec and the session manager
//! - [`obfuscation`]: reversible, non-cryptographic helpers, kept apart from `auth`
//! - [`config`]: environment-driven settings
//! - [`errors`]: crate-level error type

pub mod auth;
pub mod config;
pub mod errors;
pub mod obfuscation;

pub use errors::{Error, Result};
