//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

mod auth;
pub use auth::{use_auth, use_auth_refresh, AuthProvider, AuthRefresh, AuthState, LogoutButton};

mod persistence;
pub use persistence::ServerProfileSink;
