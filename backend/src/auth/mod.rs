//! Authentication module for the portal's principal, roles and session state.
//!
//! This module provides the role hierarchy evaluator, the route access policy,
//! the non-verifying token codec, and the session manager that owns the
//! current principal. Reversible obfuscation helpers deliberately live in
//! [`crate::obfuscation`], outside this module.

pub mod claims;
pub mod context;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod roles;
pub mod routes;
pub mod service;
pub mod token;

// Re-exports for convenience
pub use claims::Claims;
pub use context::AuthContext;
pub use errors::{AuthError, Segment, TokenError};
pub use middleware::{allowed_routes, authorize, can_access_admin, can_access_portal, AccessDecision};
pub use models::{AuthState, Credentials, UnknownRole, User, UserRole};
pub use roles::*;
pub use routes::{RouteCategory, LOGIN_PATH};
pub use service::{SessionManager, DEFAULT_STORAGE_KEY};
pub use token::{DecodedToken, TokenHeader, TokenInfo};
