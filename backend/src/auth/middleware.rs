//! Access policy for protected sections of the portal.
//!
//! Pure functions from a role (or an absent principal) to an allow/deny
//! decision. Nothing here touches a router or renderer, so the admin-section
//! gatekeeper and the tests call the same code.

use super::roles::has_role_or_higher;
use super::routes::{RouteCategory, LOGIN_PATH};
use nagari_adapters::{User, UserRole};

pub fn can_access_admin(role: UserRole) -> bool {
    has_role_or_higher(role, UserRole::Staff)
}

pub fn can_access_portal(role: UserRole) -> bool {
    has_role_or_higher(role, UserRole::Resident)
}

/// Sections available to `role`, always in the order home, portal, admin.
pub fn allowed_routes(role: UserRole) -> Vec<RouteCategory> {
    let mut routes = vec![RouteCategory::Home];
    if can_access_portal(role) {
        routes.push(RouteCategory::Portal);
    }
    if can_access_admin(role) {
        routes.push(RouteCategory::Admin);
    }
    routes
}

pub fn can_access(role: UserRole, category: RouteCategory) -> bool {
    match category {
        RouteCategory::Home => true,
        RouteCategory::Portal => can_access_portal(role),
        RouteCategory::Admin => can_access_admin(role),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// No principal; send the visitor to the login view.
    RedirectToLogin,
    /// Authenticated, but the role is below the section's threshold.
    Forbidden,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allow
    }

    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            AccessDecision::RedirectToLogin => Some(LOGIN_PATH),
            _ => None,
        }
    }
}

/// Gatekeeper decision for rendering a view in `category`.
pub fn authorize(user: Option<&User>, category: RouteCategory) -> AccessDecision {
    if !category.requires_login() {
        return AccessDecision::Allow;
    }
    match user {
        None => AccessDecision::RedirectToLogin,
        Some(user) if can_access(user.role, category) => AccessDecision::Allow,
        Some(user) => {
            tracing::debug!(user_id = %user.id, role = %user.role, %category, "access forbidden");
            AccessDecision::Forbidden
        }
    }
}
