//! Error taxonomy for the profile page.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ProfileField;

/// Per-field validation messages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<ProfileField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: ProfileField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: ProfileField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Everything that can go wrong on the profile page.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// The auth source could not be resolved.
    #[error("authentication unavailable: {0}")]
    AuthUnavailable(String),

    /// The draft failed validation; nothing was sent.
    #[error("invalid profile: {0}")]
    Validation(FieldErrors),

    /// The persistence collaborator rejected the save.
    #[error("failed to save profile: {0}")]
    Persistence(String),

    #[error("saving the profile timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("a save is already in progress")]
    SaveInFlight,

    #[error("profile is not being edited")]
    NotEditing,

    #[error("profile fields are read-only outside edit mode")]
    ReadOnly,
}

impl ProfileError {
    /// Whether the user can meaningfully try the same action again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AuthUnavailable(_) | Self::Persistence(_) | Self::Timeout { .. }
        )
    }
}

/// Failure to read the page configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid profile config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize profile config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
