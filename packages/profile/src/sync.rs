//! # Reconciling the draft with the auth source
//!
//! The page keeps its own editable copy of the user's profile. Whenever the
//! auth source publishes a record, [`reconcile_form`] decides whether the
//! draft has to be rewritten. It returns `None` when every observed field
//! already matches, so callers holding the draft in a reactive cell can skip
//! the write entirely and avoid a re-render.
//!
//! The direction is strictly record → draft. Nothing here ever pushes the
//! draft back into the record.

use crate::models::{ProfileForm, UserRecord};

/// Replacement draft for `user`, or `None` when `current` is already up to date.
pub fn reconcile_form(current: &ProfileForm, user: &UserRecord) -> Option<ProfileForm> {
    let candidate = ProfileForm::from_record(user);
    if candidate == *current {
        None
    } else {
        Some(candidate)
    }
}

/// What a sync attempt did to the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No record to sync from.
    Absent,
    /// The draft already matched the record.
    Unchanged,
    /// The draft was overwritten with the record's values.
    Replaced,
    /// The user is editing; the record was parked until editing ends.
    Deferred,
}
