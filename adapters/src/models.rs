//! Generic data models for the `adapters` crate.
//!
//! These models describe the authenticated principal exactly as it crosses the
//! adapter boundary: what an identity provider hands back after a successful
//! credential check, and what the durable side-store persists between runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of portal roles, declared from most to least privileged.
///
/// The declaration order is the privilege order, so the derived `Ord` agrees
/// with [`UserRole::rank`]: `SuperAdmin < Admin < ... < Visitor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Moderator,
    Staff,
    Resident,
    BusinessOwner,
    Visitor,
}

impl UserRole {
    /// Every role, most privileged first.
    pub const ALL: [UserRole; 7] = [
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Moderator,
        UserRole::Staff,
        UserRole::Resident,
        UserRole::BusinessOwner,
        UserRole::Visitor,
    ];

    /// Privilege rank; a lower number is more privileged.
    pub const fn rank(self) -> u8 {
        match self {
            UserRole::SuperAdmin => 1,
            UserRole::Admin => 2,
            UserRole::Moderator => 3,
            UserRole::Staff => 4,
            UserRole::Resident => 5,
            UserRole::BusinessOwner => 6,
            UserRole::Visitor => 7,
        }
    }

    /// Wire name, identical to the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPER_ADMIN",
            UserRole::Admin => "ADMIN",
            UserRole::Moderator => "MODERATOR",
            UserRole::Staff => "STAFF",
            UserRole::Resident => "RESIDENT",
            UserRole::BusinessOwner => "BUSINESS_OWNER",
            UserRole::Visitor => "VISITOR",
        }
    }

    /// Human-facing label shown in the portal.
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Admin => "Admin",
            UserRole::Moderator => "Moderator",
            UserRole::Staff => "Staf Nagari",
            UserRole::Resident => "Warga",
            UserRole::BusinessOwner => "Pelaku UMKM",
            UserRole::Visitor => "Pengunjung",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the seven role names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Login input handed to a [`CredentialVerifier`](crate::CredentialVerifier).
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_declaration_order() {
        for pair in UserRole::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(UserRole::SuperAdmin.rank(), 1);
        assert_eq!(UserRole::Visitor.rank(), 7);
    }

    #[test]
    fn role_names_parse_back() {
        for role in UserRole::ALL {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
        assert_eq!(
            "ROOT".parse::<UserRole>(),
            Err(UnknownRole("ROOT".to_string()))
        );
    }

    #[test]
    fn user_serializes_with_wire_role_names() {
        let user = User {
            id: "7".to_string(),
            name: "Siti".to_string(),
            email: "siti@nagari.id".to_string(),
            role: UserRole::BusinessOwner,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"BUSINESS_OWNER\""), "got: {json}");

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = Credentials::new("admin@nagari.id", "admin123");
        let shown = format!("{creds:?}");
        assert!(!shown.contains("admin123"), "got: {shown}");
        assert!(shown.contains("admin@nagari.id"));
    }
}
