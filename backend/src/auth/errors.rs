//! Custom error types specific to authentication failures.
//!
//! [`AuthError`] separates programmer errors (a missing auth context) from
//! user-facing rejections and transient provider failures, so the boolean
//! login wrapper is the only place that information is collapsed.
//! [`TokenError`] labels why a token failed strict decoding.

use nagari_adapters::AdapterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Session state was read before a manager was installed. Programmer error.
    #[error("auth context not installed: session state must be read through an installed SessionManager")]
    ContextNotInstalled,
    #[error("auth context already has a session manager installed")]
    ContextAlreadyInstalled,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("a login request is already in flight")]
    LoginInFlight,
    #[error("login discarded: the session was logged out while it was pending")]
    LoginSuperseded,
    #[error("identity provider failure: {0}")]
    Provider(#[source] AdapterError),
    #[error("session store failure: {0}")]
    Store(#[source] AdapterError),
}

impl AuthError {
    /// Whether the failure is worth retrying without changing input.
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::Provider(err) => err.is_transient(),
            AuthError::LoginInFlight => true,
            _ => false,
        }
    }
}

/// Which part of a three-part token failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => f.write_str("header"),
            Segment::Payload => f.write_str("payload"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token: expected 3 segments, found {0}")]
    SegmentCount(usize),
    #[error("malformed token: {segment} is not valid base64url")]
    Base64 { segment: Segment },
    #[error("malformed token: {segment} is not a JSON object")]
    Json { segment: Segment },
}
