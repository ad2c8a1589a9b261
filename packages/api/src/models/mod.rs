//! Database models for the application.

#[cfg(feature = "server")]
mod user;

#[cfg(feature = "server")]
pub(crate) use user::non_empty;
#[cfg(feature = "server")]
pub use user::User;
