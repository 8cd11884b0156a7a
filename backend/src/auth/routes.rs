//! Route categories the portal gates by role.
//!
//! Consumers map each category onto their own router; this module only knows
//! the coarse sections and their base paths.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteCategory {
    /// Public pages: home, tourism, UMKM directory, announcements.
    Home,
    /// Resident portal.
    Portal,
    /// Admin console.
    Admin,
}

impl RouteCategory {
    pub const fn base_path(self) -> &'static str {
        match self {
            RouteCategory::Home => "/",
            RouteCategory::Portal => "/portal",
            RouteCategory::Admin => "/admin",
        }
    }

    pub const fn requires_login(self) -> bool {
        !matches!(self, RouteCategory::Home)
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteCategory::Home => "home",
            RouteCategory::Portal => "portal",
            RouteCategory::Admin => "admin",
        };
        f.write_str(name)
    }
}
