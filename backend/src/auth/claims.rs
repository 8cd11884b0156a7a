//! Token payload claims.
//!
//! The payload is an open JSON object. Logical claims that historical issuers
//! wrote under different keys are resolved through the alias tables below,
//! checked in order; adding an alias is a table edit, not a code change.

use nagari_adapters::UserRole;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const USER_ID_KEYS: &[&str] = &["sub", "userId", "user_id", "id"];
pub const ROLE_KEYS: &[&str] = &["role", "userRole", "user_role"];
pub const EMAIL_KEYS: &[&str] = &["email", "userEmail", "user_email"];
pub const PERMISSION_KEYS: &[&str] = &["permissions", "perms", "scope"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// First alias in `keys` that holds a usable value.
    ///
    /// A key whose value has the wrong shape is skipped rather than ending
    /// the search, so a stray `"id": {}` does not hide a later alias.
    pub fn first_present<T>(&self, keys: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find_map(convert)
    }

    pub fn issuer(&self) -> Option<String> {
        self.get("iss").and_then(as_text)
    }

    pub fn subject(&self) -> Option<String> {
        self.get("sub").and_then(as_text)
    }

    /// `aud` may be a single string or an array of strings.
    pub fn audience(&self) -> Vec<String> {
        self.get("aud").map(as_string_list).unwrap_or_default()
    }

    pub fn jwt_id(&self) -> Option<String> {
        self.get("jti").and_then(as_text)
    }

    /// `exp`, in epoch seconds.
    pub fn expires_at(&self) -> Option<i64> {
        self.get("exp").and_then(as_epoch_seconds)
    }

    /// `nbf`, in epoch seconds.
    pub fn not_before(&self) -> Option<i64> {
        self.get("nbf").and_then(as_epoch_seconds)
    }

    /// `iat`, in epoch seconds.
    pub fn issued_at(&self) -> Option<i64> {
        self.get("iat").and_then(as_epoch_seconds)
    }

    pub fn user_id(&self) -> Option<String> {
        self.first_present(USER_ID_KEYS, as_text)
    }

    /// Raw role claim, whatever the issuer wrote.
    pub fn role(&self) -> Option<String> {
        self.first_present(ROLE_KEYS, as_text)
    }

    /// Role claim parsed into the portal's role set.
    pub fn user_role(&self) -> Option<UserRole> {
        self.role().and_then(|role| role.parse().ok())
    }

    pub fn email(&self) -> Option<String> {
        self.first_present(EMAIL_KEYS, as_text)
    }

    /// Permissions as an array of strings, or an OAuth-style space-separated
    /// `scope` string.
    pub fn permissions(&self) -> Vec<String> {
        self.first_present(PERMISSION_KEYS, |value| match value {
            Value::String(_) | Value::Array(_) => Some(as_string_list(value)),
            _ => None,
        })
        .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Strings as-is; numeric ids are rendered in decimal.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_epoch_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        _ => None,
    }
}

fn as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
