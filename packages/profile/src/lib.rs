//! # Profile crate — state behind the profile settings page
//!
//! Everything the page decides, without anything it draws. The Dioxus
//! components in `ui` hold these types in signals and call into them from
//! effects and event handlers; the server functions in `api` reuse the
//! model and validation.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | [`UserRecord`] from the auth source, the editable [`ProfileForm`], [`ProfileField`] |
//! | [`sync`] | [`reconcile_form`]: record → draft, skipping no-op writes |
//! | [`gate`] | [`AuthGate`]: loading / unavailable / redirect / render, with a once-per-transition redirect |
//! | [`editor`] | [`ProfileEditor`]: edit mode, save tickets, [`ProfileSink`], [`save_with_timeout`] |
//! | [`notifications`] | [`NotificationPrefs`] toggles |
//! | [`validation`] | per-field checks shared with the server |
//! | [`error`] | [`ProfileError`], [`FieldErrors`], [`ConfigError`] |
//! | [`config`] | [`ProfileConfig`] read from `profile.toml` |

pub mod config;
pub mod editor;
pub mod error;
pub mod gate;
pub mod models;
pub mod notifications;
pub mod sync;
pub mod validation;

pub use config::ProfileConfig;
pub use editor::{save_with_timeout, EditMode, ProfileEditor, ProfileSink, SaveResponse, SaveTicket};
pub use error::{ConfigError, FieldErrors, ProfileError};
pub use gate::{AuthGate, AuthSnapshot, GateView, Navigate};
pub use models::{ProfileField, ProfileForm, UserRecord};
pub use notifications::{NotificationKind, NotificationPrefs};
pub use sync::{reconcile_form, SyncOutcome};
pub use validation::validate;
