//! Application configuration, read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `NAGARI_STORE_PATH` | `.nagari/session.json` |
//! | `NAGARI_STORAGE_KEY` | `nagari_user` |
//! | `NAGARI_LOGIN_DELAY_MS` | `1000` |

use crate::auth::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const STORE_PATH_VAR: &str = "NAGARI_STORE_PATH";
pub const STORAGE_KEY_VAR: &str = "NAGARI_STORAGE_KEY";
pub const LOGIN_DELAY_VAR: &str = "NAGARI_LOGIN_DELAY_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file backing the durable side-store.
    pub store_path: PathBuf,
    pub storage_key: String,
    /// Artificial latency of the mocked identity provider.
    pub login_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".nagari/session.json"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            login_delay: nagari_adapters::mock::DEFAULT_DELAY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable source; unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(STORE_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }
        if let Some(key) = lookup(STORAGE_KEY_VAR).filter(|v| !v.trim().is_empty()) {
            config.storage_key = key;
        }
        if let Some(raw) = lookup(LOGIN_DELAY_VAR) {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: LOGIN_DELAY_VAR,
                value: raw.clone(),
            })?;
            config.login_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }
}
