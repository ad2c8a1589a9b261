//! # User row
//!
//! [`User`] is the complete row of the `users` table, loaded with
//! [`sqlx::FromRow`]. It never leaves the server: [`User::to_record`]
//! projects it into the client-safe [`UserRecord`], dropping the password
//! hash and timestamps and turning the `Uuid` into a string so it works in
//! WASM. Empty optional columns are reported as absent.

use chrono::{DateTime, Utc};
use profile::UserRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Convert to a [`UserRecord`] for client consumption.
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.to_string(),
            full_name: non_empty(self.full_name.as_deref()),
            email: non_empty(Some(&self.email)),
            username: non_empty(self.username.as_deref()),
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_record() {
        let user = User {
            id: Uuid::nil(),
            email: "jane@example.com".into(),
            full_name: Some(String::new()),
            username: Some("jane".into()),
            password_hash: Some("$argon2id$...".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let record = user.to_record();
        assert_eq!(record.id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(record.full_name, None);
        assert_eq!(record.email.as_deref(), Some("jane@example.com"));
        assert_eq!(record.username.as_deref(), Some("jane"));
    }
}
