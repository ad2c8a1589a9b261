//! Field validation for the profile draft.
//!
//! Used by the editor before a save leaves the page and again by the server
//! before it touches the database.

use crate::error::FieldErrors;
use crate::models::{ProfileField, ProfileForm};

pub const MAX_FULL_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=32;

/// Validate every field, collecting one message per failing field.
pub fn validate(form: &ProfileForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(message) = check_full_name(&form.full_name) {
        errors.insert(ProfileField::FullName, message);
    }
    if let Some(message) = check_username(&form.username) {
        errors.insert(ProfileField::Username, message);
    }
    if let Some(message) = check_email(&form.email) {
        errors.insert(ProfileField::Email, message);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_full_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.chars().count() > MAX_FULL_NAME_LEN {
        return Some(format!(
            "Full name must be at most {MAX_FULL_NAME_LEN} characters"
        ));
    }
    None
}

fn check_username(username: &str) -> Option<String> {
    let username = username.trim();
    // Empty means "no username".
    if username.is_empty() {
        return None;
    }
    if !USERNAME_LEN.contains(&username.chars().count()) {
        return Some(format!(
            "Username must be {} to {} characters",
            USERNAME_LEN.start(),
            USERNAME_LEN.end()
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Some(
            "Username may only contain letters, digits, '_', '-' and '.'".to_string(),
        );
    }
    None
}

fn check_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("Email is required".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Some(format!("Email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if email.chars().any(char::is_whitespace) {
        return Some("Email must not contain spaces".to_string());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Some("Please enter a valid email".to_string());
    };
    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty());
    if local.is_empty() || !domain_ok {
        return Some("Please enter a valid email".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, username: &str, email: &str) -> ProfileForm {
        ProfileForm {
            full_name: full_name.into(),
            email: email.into(),
            username: username.into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(validate(&form("Jane Doe", "jane_doe", "jane@example.com")).is_ok());
        // Optional fields may be empty.
        assert!(validate(&form("", "", "jane@example.com")).is_ok());
    }

    #[test]
    fn test_email_rules() {
        for bad in ["", "jane", "@example.com", "jane@", "jane@example", "jane@@example.com", "ja ne@example.com", "jane@example..com"] {
            let errors = validate(&form("Jane", "jane", bad)).unwrap_err();
            assert!(errors.get(ProfileField::Email).is_some(), "accepted {bad:?}");
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_username_rules() {
        let errors = validate(&form("", "jd", "jane@example.com")).unwrap_err();
        assert!(errors.get(ProfileField::Username).unwrap().contains("3 to 32"));

        let errors = validate(&form("", "jane doe", "jane@example.com")).unwrap_err();
        assert!(errors.get(ProfileField::Username).unwrap().contains("only contain"));

        assert!(validate(&form("", "jane.doe-99", "jane@example.com")).is_ok());
    }

    #[test]
    fn test_collects_every_field() {
        let long_name = "x".repeat(MAX_FULL_NAME_LEN + 1);
        let errors = validate(&form(&long_name, "!", "nope")).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
