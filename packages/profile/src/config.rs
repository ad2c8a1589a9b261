//! # Page configuration — `profile.toml`
//!
//! ```toml
//! [routes]
//! login = "/login"          # where unauthenticated visitors are sent
//! after_login = "/profile"  # where a successful sign-in lands
//!
//! [save]
//! timeout_secs = 10         # upper bound on a single save request
//!
//! [notifications]           # initial toggle state
//! email = true
//! push = false
//! security = true
//! ```
//!
//! Every section and key is optional; a missing or empty file is the same
//! as [`ProfileConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notifications::NotificationPrefs;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub notifications: NotificationPrefs,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login")]
    pub login: String,
    #[serde(default = "default_after_login")]
    pub after_login: String,
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_after_login() -> String {
    "/profile".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            after_login: default_after_login(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Seconds before an unanswered save is reported as failed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProfileConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse `s`, falling back to the defaults when it is malformed.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!("{e}; using default profile config");
            Self::default()
        })
    }

    pub fn save_timeout(&self) -> Duration {
        // A zero timeout would fail every save before it is sent.
        Duration::from_secs(self.save.timeout_secs.max(1))
    }
}
