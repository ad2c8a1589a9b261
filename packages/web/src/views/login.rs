//! Login page view with an email/password form.

use dioxus::prelude::*;
use profile::ProfileConfig;
use ui::components::{Button, ButtonVariant, Input};
use ui::use_auth;

use super::route_for;
use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let config = use_context::<ProfileConfig>();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the profile
    let after_login = config.routes.after_login.clone();
    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_some() {
            nav.replace(route_for(&after_login, Route::Profile {}));
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Enter your email and password".to_string()));
                return;
            }

            loading.set(true);
            match api::login_password(e, p).await {
                Ok(user) => {
                    // The effect above takes it from here.
                    auth.set(ui::AuthState {
                        user: Some(user),
                        loading: false,
                        error: None,
                    });
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-title", "Sign in" }

            form {
                onsubmit: handle_login,
                class: "auth-form",

                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
                }

                Input {
                    class: "w-full",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                Input {
                    class: "w-full",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-footer",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
