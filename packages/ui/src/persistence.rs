//! Server-backed [`ProfileSink`].

use profile::{ProfileError, ProfileForm, ProfileSink, UserRecord};

/// Saves the profile through the `update_profile` server function.
///
/// Fields the server refuses come back as [`ProfileError::Validation`], so
/// they land next to their inputs instead of in the generic save error.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerProfileSink;

impl ProfileSink for ServerProfileSink {
    async fn save_profile(&self, form: ProfileForm) -> Result<UserRecord, ProfileError> {
        api::update_profile(form)
            .await
            .map_err(|e| ProfileError::Persistence(e.to_string()))?
            .into_result()
    }
}
