//! Session access for server functions.

use dioxus::prelude::ServerFnError;
use uuid::Uuid;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user's id, or `None` for an anonymous session.
pub async fn session_user_id(
    session: &tower_sessions::Session,
) -> Result<Option<Uuid>, ServerFnError> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user_id
        .map(|id| Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string())))
        .transpose()
}
