//! # Edit mode and the save cycle
//!
//! [`ProfileEditor`] is the single owner of the profile draft. It moves
//! between three modes:
//!
//! ```text
//!            begin_edit              begin_save (valid)
//!  Viewing ─────────────▶ Editing ─────────────────────▶ Saving
//!     ▲                    │  ▲                             │
//!     │    cancel_edit     │  │      finish_save(Err)       │
//!     ├────────────────────┘  └─────────────────────────────┤
//!     │                   finish_save(Ok)                   │
//!     └─────────────────────────────────────────────────────┘
//! ```
//!
//! Fields accept input only in `Editing`. A save is split in two halves so
//! the draft never has to be borrowed across an `.await`:
//! [`begin_save`](ProfileEditor::begin_save) validates and hands out a
//! [`SaveTicket`], the caller sends the ticket's form through a
//! [`ProfileSink`] (usually via [`save_with_timeout`]), and
//! [`finish_save`](ProfileEditor::finish_save) applies the outcome. Only the
//! newest ticket is honoured; completions for anything else are dropped.
//!
//! Records pushed by the auth source while the user is editing are parked
//! and applied once editing ends, so in-progress edits are never overwritten.
//! A record for a *different* user replaces the draft immediately.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};
use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, ProfileError};
use crate::models::{ProfileField, ProfileForm, UserRecord};
use crate::sync::{reconcile_form, SyncOutcome};
use crate::validation::validate;

/// Persistence collaborator for the profile draft.
pub trait ProfileSink {
    fn save_profile(
        &self,
        form: ProfileForm,
    ) -> impl Future<Output = Result<UserRecord, ProfileError>>;
}

/// The server's answer to a save: the stored record, or the fields it refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveResponse {
    Saved(UserRecord),
    Rejected(FieldErrors),
}

impl SaveResponse {
    pub fn into_result(self) -> Result<UserRecord, ProfileError> {
        match self {
            Self::Saved(user) => Ok(user),
            Self::Rejected(errors) => Err(ProfileError::Validation(errors)),
        }
    }
}

/// Edit-mode state of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
    /// A save is in flight; fields are read-only.
    Saving,
}

/// Proof that a save was started; required to complete it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveTicket {
    id: u64,
    form: ProfileForm,
}

impl SaveTicket {
    /// The validated, trimmed form to transmit.
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileEditor {
    mode: EditMode,
    form: ProfileForm,
    synced: Option<UserRecord>,
    pending: Option<UserRecord>,
    field_errors: FieldErrors,
    save_error: Option<ProfileError>,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn is_editable(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn field_error(&self, field: ProfileField) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn save_error(&self) -> Option<&ProfileError> {
        self.save_error.as_ref()
    }

    /// Last record the draft was seeded from.
    pub fn synced_user(&self) -> Option<&UserRecord> {
        self.synced.as_ref()
    }

    /// Whether a newer record is waiting for editing to end.
    pub fn has_pending_update(&self) -> bool {
        self.pending.is_some()
    }

    /// Bring the draft in line with the auth source's current record.
    pub fn sync_from(&mut self, user: Option<&UserRecord>) -> SyncOutcome {
        let Some(user) = user else {
            return SyncOutcome::Absent;
        };

        let same_identity = self.synced.as_ref().is_some_and(|s| s.id == user.id);
        if self.mode != EditMode::Viewing && same_identity {
            if self.synced.as_ref() == Some(user) {
                self.pending = None;
                return SyncOutcome::Unchanged;
            }
            tracing::debug!(user = %user.id, "record changed while editing, deferring sync");
            self.pending = Some(user.clone());
            return SyncOutcome::Deferred;
        }

        if !same_identity && self.mode != EditMode::Viewing {
            tracing::debug!(user = %user.id, "user changed while editing, discarding draft");
            self.reset_to_viewing();
        }

        self.synced = Some(user.clone());
        self.pending = None;
        match reconcile_form(&self.form, user) {
            Some(form) => {
                self.form = form;
                SyncOutcome::Replaced
            }
            None => SyncOutcome::Unchanged,
        }
    }

    pub fn begin_edit(&mut self) -> Result<(), ProfileError> {
        match self.mode {
            EditMode::Viewing => {
                self.mode = EditMode::Editing;
                Ok(())
            }
            EditMode::Editing => Ok(()),
            EditMode::Saving => Err(ProfileError::SaveInFlight),
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) -> Result<(), ProfileError> {
        if !self.is_editable() {
            return Err(ProfileError::ReadOnly);
        }
        self.form.set(field, value);
        self.field_errors.remove(field);
        Ok(())
    }

    /// Leave edit mode, throwing the draft away in favour of the newest record.
    pub fn cancel_edit(&mut self) -> Result<(), ProfileError> {
        match self.mode {
            EditMode::Editing => {
                self.reset_to_viewing();
                if let Some(user) = self.pending.take() {
                    self.synced = Some(user);
                }
                self.form = self
                    .synced
                    .as_ref()
                    .map(ProfileForm::from_record)
                    .unwrap_or_default();
                Ok(())
            }
            EditMode::Saving => Err(ProfileError::SaveInFlight),
            EditMode::Viewing => Err(ProfileError::NotEditing),
        }
    }

    /// Validate the draft and start a save.
    pub fn begin_save(&mut self) -> Result<SaveTicket, ProfileError> {
        match self.mode {
            EditMode::Saving => return Err(ProfileError::SaveInFlight),
            EditMode::Viewing => return Err(ProfileError::NotEditing),
            EditMode::Editing => {}
        }

        if let Err(errors) = validate(&self.form) {
            self.field_errors = errors.clone();
            return Err(ProfileError::Validation(errors));
        }

        self.field_errors = FieldErrors::new();
        self.save_error = None;
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        self.mode = EditMode::Saving;

        Ok(SaveTicket {
            id: self.next_ticket,
            form: self.form.trimmed(),
        })
    }

    /// Apply the outcome of a save. Returns `false` if the ticket is stale.
    pub fn finish_save(
        &mut self,
        ticket: &SaveTicket,
        result: Result<UserRecord, ProfileError>,
    ) -> bool {
        if self.in_flight != Some(ticket.id) {
            tracing::debug!(ticket = ticket.id, "ignoring stale save completion");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(user) => {
                self.form = ProfileForm::from_record(&user);
                self.synced = Some(user);
                self.pending = None;
                self.mode = EditMode::Viewing;
            }
            Err(error) => {
                tracing::warn!(%error, "profile save failed");
                if let ProfileError::Validation(errors) = &error {
                    self.field_errors = errors.clone();
                }
                self.save_error = Some(error);
                self.mode = EditMode::Editing;
            }
        }
        true
    }

    fn reset_to_viewing(&mut self) {
        self.mode = EditMode::Viewing;
        self.in_flight = None;
        self.field_errors = FieldErrors::new();
        self.save_error = None;
    }
}

/// Send `form` through `sink`, giving up after `timeout`.
pub async fn save_with_timeout<S: ProfileSink>(
    sink: &S,
    form: ProfileForm,
    timeout: Duration,
) -> Result<UserRecord, ProfileError> {
    let save = pin!(sink.save_profile(form));
    let timer = pin!(sleep(timeout));
    match select(save, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ProfileError::Timeout { after: timeout }),
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Sink that records what it was sent and answers with a canned result.
    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<ProfileForm>>>,
        fail_with: Option<ProfileError>,
    }

    impl ProfileSink for RecordingSink {
        async fn save_profile(&self, form: ProfileForm) -> Result<UserRecord, ProfileError> {
            self.sent.lock().unwrap().push(form.clone());
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(UserRecord {
                    id: "u1".into(),
                    full_name: Some(form.full_name),
                    email: Some(form.email),
                    username: Some(form.username),
                }),
            }
        }
    }

    struct StalledSink;

    impl ProfileSink for StalledSink {
        async fn save_profile(&self, _form: ProfileForm) -> Result<UserRecord, ProfileError> {
            futures::future::pending().await
        }
    }

    fn john() -> UserRecord {
        UserRecord {
            id: "u1".into(),
            full_name: Some("John Smith".into()),
            email: Some("john@example.com".into()),
            username: Some("jsmith".into()),
        }
    }

    fn seeded() -> ProfileEditor {
        let mut editor = ProfileEditor::new();
        assert_eq!(editor.sync_from(Some(&john())), SyncOutcome::Replaced);
        editor
    }

    async fn save(editor: &mut ProfileEditor, sink: &RecordingSink) -> Result<(), ProfileError> {
        let ticket = editor.begin_save()?;
        let result = save_with_timeout(sink, ticket.form().clone(), Duration::from_secs(5)).await;
        editor.finish_save(&ticket, result.clone());
        result.map(|_| ())
    }

    #[test]
    fn test_fields_read_only_outside_editing() {
        let mut editor = seeded();
        assert_eq!(
            editor.set_field(ProfileField::FullName, "X".into()),
            Err(ProfileError::ReadOnly)
        );
        assert_eq!(editor.form().full_name, "John Smith");
    }

    #[test]
    fn test_sync_absent_and_unchanged() {
        let mut editor = seeded();
        assert_eq!(editor.sync_from(None), SyncOutcome::Absent);
        assert_eq!(editor.sync_from(Some(&john())), SyncOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_save_success_returns_to_viewing() {
        let mut editor = seeded();
        let sink = RecordingSink::default();

        editor.begin_edit().unwrap();
        editor.set_field(ProfileField::FullName, "Jane Doe".into()).unwrap();
        save(&mut editor, &sink).await.unwrap();

        let sent = sink.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![ProfileForm {
                full_name: "Jane Doe".into(),
                email: "john@example.com".into(),
                username: "jsmith".into(),
            }]
        );
        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.form().full_name, "Jane Doe");
        assert_eq!(editor.synced_user().unwrap().full_name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_save_failure_keeps_editing_and_draft() {
        let mut editor = seeded();
        let sink = RecordingSink {
            fail_with: Some(ProfileError::Persistence("connection reset".into())),
            ..Default::default()
        };

        editor.begin_edit().unwrap();
        editor.set_field(ProfileField::FullName, "Jane Doe".into()).unwrap();
        let err = save(&mut editor, &sink).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(editor.mode(), EditMode::Editing);
        assert_eq!(editor.form().full_name, "Jane Doe");
        assert_eq!(editor.save_error(), Some(&err));

        // Retry succeeds once the sink recovers.
        let sink = RecordingSink::default();
        save(&mut editor, &sink).await.unwrap();
        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.save_error(), None);
    }

    #[test]
    fn test_invalid_draft_never_leaves_page() {
        let mut editor = seeded();
        editor.begin_edit().unwrap();
        editor.set_field(ProfileField::Email, "not-an-email".into()).unwrap();

        let err = editor.begin_save().unwrap_err();
        assert!(matches!(err, ProfileError::Validation(_)));
        assert_eq!(editor.mode(), EditMode::Editing);
        assert!(editor.field_error(ProfileField::Email).is_some());

        // Editing the field clears its message.
        editor.set_field(ProfileField::Email, "jane@example.com".into()).unwrap();
        assert_eq!(editor.field_error(ProfileField::Email), None);
    }

    #[tokio::test]
    async fn test_server_rejection_surfaces_field_message() {
        struct TakenUsernameSink;

        impl ProfileSink for TakenUsernameSink {
            async fn save_profile(&self, _form: ProfileForm) -> Result<UserRecord, ProfileError> {
                let mut errors = FieldErrors::new();
                errors.insert(ProfileField::Username, "That username is already taken");
                SaveResponse::Rejected(errors).into_result()
            }
        }

        let mut editor = seeded();
        editor.begin_edit().unwrap();
        editor.set_field(ProfileField::Username, "taken".into()).unwrap();
        let ticket = editor.begin_save().unwrap();
        let result =
            save_with_timeout(&TakenUsernameSink, ticket.form().clone(), Duration::from_secs(5)).await;
        assert!(editor.finish_save(&ticket, result));

        assert_eq!(editor.mode(), EditMode::Editing);
        assert_eq!(
            editor.field_error(ProfileField::Username),
            Some("That username is already taken")
        );
        assert!(!editor.save_error().unwrap().is_retryable());
        assert_eq!(editor.form().username, "taken");
    }

    #[test]
    fn test_saved_response_is_ok() {
        assert_eq!(SaveResponse::Saved(john()).into_result(), Ok(john()));
    }

    #[test]
    fn test_overlapping_save_rejected() {
        let mut editor = seeded();
        editor.begin_edit().unwrap();
        let ticket = editor.begin_save().unwrap();

        assert_eq!(editor.begin_save(), Err(ProfileError::SaveInFlight));
        assert_eq!(editor.begin_edit(), Err(ProfileError::SaveInFlight));
        assert!(!editor.is_editable());

        assert!(editor.finish_save(&ticket, Ok(john())));
        assert!(!editor.finish_save(&ticket, Ok(john())));
    }

    #[test]
    fn test_save_requires_editing() {
        let mut editor = seeded();
        assert_eq!(editor.begin_save(), Err(ProfileError::NotEditing));
        assert_eq!(editor.cancel_edit(), Err(ProfileError::NotEditing));
    }

    #[test]
    fn test_update_while_editing_is_deferred() {
        let mut editor = seeded();
        editor.begin_edit().unwrap();
        editor.set_field(ProfileField::FullName, "Jane Doe".into()).unwrap();

        let mut updated = john();
        updated.email = Some("john@example.org".into());
        assert_eq!(editor.sync_from(Some(&updated)), SyncOutcome::Deferred);
        assert_eq!(editor.form().full_name, "Jane Doe");
        assert!(editor.has_pending_update());

        editor.cancel_edit().unwrap();
        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.form(), &ProfileForm::from_record(&updated));
        assert!(!editor.has_pending_update());
    }

    #[test]
    fn test_other_user_replaces_draft() {
        let mut editor = seeded();
        editor.begin_edit().unwrap();
        let ticket = editor.begin_save().unwrap();

        let other = UserRecord {
            id: "u2".into(),
            full_name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            username: None,
        };
        assert_eq!(editor.sync_from(Some(&other)), SyncOutcome::Replaced);
        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.form().username, "");

        // The earlier save belongs to the previous user.
        assert!(!editor.finish_save(&ticket, Ok(john())));
        assert_eq!(editor.form().full_name, "Ada");
    }

    #[tokio::test]
    async fn test_save_times_out() {
        let result = save_with_timeout(
            &StalledSink,
            ProfileForm::default(),
            Duration::from_millis(20),
        )
        .await;
        assert_eq!(
            result,
            Err(ProfileError::Timeout {
                after: Duration::from_millis(20)
            })
        );
    }

    #[test]
    fn test_ticket_form_is_trimmed() {
        let mut editor = seeded();
        editor.begin_edit().unwrap();
        editor.set_field(ProfileField::Username, "  jane  ".into()).unwrap();
        let ticket = editor.begin_save().unwrap();
        assert_eq!(ticket.form().username, "jane");
    }
}
