//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] is the auth source for every page below it: it resolves
//! the session user on mount, re-checks it periodically, and publishes the
//! result as a `Signal<AuthState>` in context.

use std::time::Duration;

use dioxus::prelude::*;
use profile::ProfileError;

pub use profile::AuthSnapshot as AuthState;

/// How often the provider re-checks the session once it has resolved.
const RECHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Handle for re-running the initial user lookup, e.g. after it failed.
#[derive(Clone, Copy)]
pub struct AuthRefresh(Resource<()>);

impl AuthRefresh {
    pub fn refresh(&mut self) {
        self.0.restart();
    }
}

pub fn use_auth_refresh() -> AuthRefresh {
    use_context::<AuthRefresh>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Resolve the session user on mount (and on every refresh).
    let lookup = use_resource(move || async move {
        if !auth_state.peek().loading {
            auth_state.write().loading = true;
        }
        let next = match api::get_current_user().await {
            Ok(user) => AuthState {
                user,
                loading: false,
                error: None,
            },
            Err(e) => {
                tracing::warn!("Failed to resolve current user: {e}");
                AuthState {
                    user: None,
                    loading: false,
                    error: Some(ProfileError::AuthUnavailable(e.to_string())),
                }
            }
        };
        auth_state.set(next);
    });

    // Periodic re-check so the page sees profile changes made elsewhere.
    use_effect(move || {
        spawn(async move {
            loop {
                sleep(RECHECK_INTERVAL).await;

                // Don't check while a lookup is still in progress
                if auth_state.peek().loading {
                    continue;
                }
                let current = auth_state.peek().clone();
                match api::get_current_user().await {
                    Ok(user) => {
                        if current.user != user || current.error.is_some() {
                            auth_state.set(AuthState {
                                user,
                                loading: false,
                                error: None,
                            });
                        }
                    }
                    Err(e) => {
                        let error = ProfileError::AuthUnavailable(e.to_string());
                        if current.error.as_ref() != Some(&error) {
                            tracing::warn!("Session re-check failed: {e}");
                            auth_state.write().error = Some(error);
                        }
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);
    use_context_provider(|| AuthRefresh(lookup));

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                    error: None,
                });
            }
            Err(e) => tracing::error!("Failed to log out: {e}"),
        }
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: onclick,
            "{label}"
        }
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
