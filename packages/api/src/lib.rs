//! # API crate — fullstack server functions for the profile page
//!
//! Defines every Dioxus server function the web frontend calls. Each public
//! `async fn` is annotated with `#[get(...)]` or `#[post(...)]` and compiled
//! twice: once with the real server logic (behind `#[cfg(feature = "server")]`)
//! and once as a thin client stub that forwards the call over HTTP.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Session user lookup, Argon2id password hashing |
//! | [`db`] | `server` | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`models`] | `server` | The `users` row and its projection into [`UserRecord`] |
//!
//! ## Server functions
//!
//! - **Auth source**: `get_current_user`
//! - **Sign-in**: `login_password`, `register`, `logout`
//! - **Persistence**: `update_profile`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;

pub use profile::{ProfileForm, SaveResponse, UserRecord};

use profile::{FieldErrors, ProfileField};

/// Field blamed for a unique violation on `constraint`, with its message.
/// Constraint names come from the users migration.
pub fn unique_violation_errors(constraint: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match constraint {
        Some("users_username_key") => {
            errors.insert(ProfileField::Username, "That username is already taken")
        }
        _ => errors.insert(
            ProfileField::Email,
            "An account with this email already exists",
        ),
    }
    errors
}

/// The offending fields when `e` is a unique violation.
#[cfg(feature = "server")]
fn unique_violation(e: &sqlx::Error) -> Option<FieldErrors> {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(unique_violation_errors(db.constraint()))
        }
        _ => None,
    }
}

#[cfg(feature = "server")]
fn db_error(e: sqlx::Error) -> ServerFnError {
    if let Some(errors) = unique_violation(&e) {
        let message: Vec<&str> = errors.iter().map(|(_, message)| message).collect();
        return ServerFnError::new(message.join("; "));
    }
    tracing::error!("database error: {e}");
    ServerFnError::new(e.to_string())
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserRecord>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(user_id) = auth::session_user_id(&session).await? else {
        return Ok(None);
    };

    let pool = get_pool().await.map_err(db_error)?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(db_error)?;

    Ok(user.map(|u| u.to_record()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserRecord>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Create a local account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    email: String,
    password: String,
    full_name: String,
) -> Result<UserRecord, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let form = ProfileForm {
        full_name: full_name.trim().to_string(),
        email: email.trim().to_lowercase(),
        username: String::new(),
    };
    profile::validate(&form).map_err(|e| ServerFnError::new(e.to_string()))?;

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let pool = get_pool().await.map_err(db_error)?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (email, full_name, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&form.email)
    .bind(models::non_empty(Some(&form.full_name)))
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(db_error)?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user = %user.id, "registered new account");
    Ok(user.to_record())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    full_name: String,
) -> Result<UserRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserRecord, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let email = email.trim().to_lowercase();

    let pool = get_pool().await.map_err(db_error)?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(db_error)?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid email or password"));
    };
    let Some(ref hash) = user.password_hash else {
        return Err(ServerFnError::new("Invalid email or password"));
    };
    if !auth::verify_password(&password, hash).map_err(ServerFnError::new)? {
        return Err(ServerFnError::new("Invalid email or password"));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_record())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Persist the profile draft for the signed-in user.
///
/// Drafts the server refuses (invalid fields, a taken email or username) come
/// back as [`SaveResponse::Rejected`] rather than as an error, so the client
/// can show each message next to its field.
#[cfg(feature = "server")]
#[post("/api/profile", session: tower_sessions::Session)]
pub async fn update_profile(form: ProfileForm) -> Result<SaveResponse, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(user_id) = auth::session_user_id(&session).await? else {
        return Err(ServerFnError::new("Not authenticated"));
    };

    let mut form = form.trimmed();
    form.email = form.email.to_lowercase();
    if let Err(errors) = profile::validate(&form) {
        tracing::debug!(user = %user_id, "rejected invalid profile: {errors}");
        return Ok(SaveResponse::Rejected(errors));
    }

    let pool = get_pool().await.map_err(db_error)?;

    let result: Result<Option<User>, sqlx::Error> = sqlx::query_as(
        "UPDATE users SET full_name = $2, email = $3, username = $4, updated_at = NOW()
         WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(models::non_empty(Some(&form.full_name)))
    .bind(&form.email)
    .bind(models::non_empty(Some(&form.username)))
    .fetch_optional(pool)
    .await;

    let user = match result {
        Ok(user) => user,
        Err(e) => match unique_violation(&e) {
            Some(errors) => {
                tracing::debug!(user = %user_id, "rejected profile: {errors}");
                return Ok(SaveResponse::Rejected(errors));
            }
            None => return Err(db_error(e)),
        },
    };

    let Some(user) = user else {
        return Err(ServerFnError::new("User not found"));
    };

    tracing::info!(user = %user.id, "profile updated");
    Ok(SaveResponse::Saved(user.to_record()))
}

#[cfg(not(feature = "server"))]
#[post("/api/profile")]
pub async fn update_profile(form: ProfileForm) -> Result<SaveResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taken_username_blames_username() {
        let errors = unique_violation_errors(Some("users_username_key"));
        assert_eq!(
            errors.get(ProfileField::Username),
            Some("That username is already taken")
        );
        assert_eq!(errors.get(ProfileField::Email), None);

        let error = SaveResponse::Rejected(errors).into_result().unwrap_err();
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_other_unique_violations_blame_email() {
        for constraint in [Some("users_email_key"), None] {
            let errors = unique_violation_errors(constraint);
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get(ProfileField::Email),
                Some("An account with this email already exists")
            );
        }
    }
}
