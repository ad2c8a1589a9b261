//! # Profile data model
//!
//! Two representations of the same three profile fields live side by side:
//!
//! | Type | Owner | Notes |
//! |------|-------|-------|
//! | [`UserRecord`] | the auth source | Authoritative and read-only to the page. Every field except `id` may be missing. |
//! | [`ProfileForm`] | the page | The editable draft. Always three plain strings, empty by default. |
//!
//! [`ProfileField`] names one field of the draft so that inputs, validation
//! messages and the editor can address it without stringly-typed keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User record as supplied by the auth source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable identity of the user.
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl UserRecord {
    /// Name to greet the user with, falling back to username and then email.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.username.as_deref().filter(|u| !u.is_empty()))
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

/// Editable draft of the profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
}

impl ProfileForm {
    /// Candidate form for a record; absent fields become empty strings.
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            full_name: user.full_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            username: user.username.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::FullName => self.full_name = value,
            ProfileField::Username => self.username = value,
            ProfileField::Email => self.email = value,
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
        }
    }
}

/// One field of [`ProfileForm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    FullName,
    Username,
    Email,
}

impl ProfileField {
    /// Fields in the order the page renders them.
    pub const ALL: [ProfileField; 3] = [Self::FullName, Self::Username, Self::Email];

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Username => "Username",
            Self::Email => "Email",
        }
    }

    /// HTML input type for the field.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            _ => "text",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_defaults_missing_fields() {
        let user = UserRecord {
            id: "u1".into(),
            full_name: None,
            email: Some("a@example.com".into()),
            username: None,
        };
        let form = ProfileForm::from_record(&user);
        assert_eq!(form.full_name, "");
        assert_eq!(form.email, "a@example.com");
        assert_eq!(form.username, "");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = UserRecord {
            id: "u1".into(),
            full_name: Some(String::new()),
            email: Some("a@example.com".into()),
            username: Some("alice".into()),
        };
        assert_eq!(user.display_name(), "alice");
        user.full_name = Some("Alice Liddell".into());
        assert_eq!(user.display_name(), "Alice Liddell");
        user.full_name = None;
        user.username = None;
        assert_eq!(user.display_name(), "a@example.com");
    }

    #[test]
    fn test_field_accessors() {
        let mut form = ProfileForm::default();
        for field in ProfileField::ALL {
            form.set(field, field.label().to_lowercase());
        }
        assert_eq!(form.get(ProfileField::FullName), "full name");
        assert_eq!(form.get(ProfileField::Email), "email");
        assert_eq!(ProfileField::Email.input_type(), "email");
        assert_eq!(ProfileField::Username.input_type(), "text");
    }
}
