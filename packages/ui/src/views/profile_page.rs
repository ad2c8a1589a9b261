use dioxus::prelude::*;

use profile::{
    save_with_timeout, AuthGate, EditMode, GateView, ProfileConfig, ProfileEditor, ProfileField,
};

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::icons::{FaFloppyDisk, FaPenToSquare, FaUser};
use crate::persistence::ServerProfileSink;
use crate::views::NotificationCard;
use crate::{use_auth, use_auth_refresh, Icon, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Profile settings page.
///
/// Expects a [`ProfileConfig`] in context. `on_redirect` receives the login
/// path when the visitor turns out to be signed out.
#[component]
pub fn ProfileView(on_redirect: EventHandler<String>) -> Element {
    let config = use_context::<ProfileConfig>();
    let save_timeout = config.save_timeout();

    let login_path = config.routes.login.clone();
    let initial_prefs = config.notifications;

    let mut auth = use_auth();
    let mut refresh = use_auth_refresh();
    let mut gate = use_signal(move || AuthGate::new(login_path));
    let mut editor = use_signal(ProfileEditor::new);
    let mut prefs = use_signal(move || initial_prefs);

    // Auth gate: re-evaluated whenever the auth state changes.
    use_effect(move || {
        let snapshot = auth();
        gate.write()
            .evaluate(&snapshot, &mut |path: &str| on_redirect.call(path.to_string()));
    });

    // Seed the draft from the auth source, without writing on no-op syncs.
    use_effect(move || {
        let user = auth().user;
        let mut next = editor.peek().clone();
        let outcome = next.sync_from(user.as_ref());
        if next != *editor.peek() {
            tracing::debug!(?outcome, "profile draft synced");
            editor.set(next);
        }
    });

    let handle_primary = move |_| {
        let mode = editor.read().mode();
        match mode {
            EditMode::Viewing => {
                if let Err(e) = editor.write().begin_edit() {
                    tracing::debug!("cannot edit profile: {e}");
                }
            }
            EditMode::Editing => {
                let ticket = match editor.write().begin_save() {
                    Ok(ticket) => ticket,
                    Err(e) => {
                        tracing::debug!("save blocked: {e}");
                        return;
                    }
                };
                // Scoped to this component; dropped if the page unmounts.
                spawn(async move {
                    let result =
                        save_with_timeout(&ServerProfileSink, ticket.form().clone(), save_timeout)
                            .await;
                    let applied = editor.write().finish_save(&ticket, result.clone());
                    if let (true, Ok(user)) = (applied, result) {
                        auth.write().user = Some(user);
                    }
                });
            }
            EditMode::Saving => {}
        }
    };

    let handle_cancel = move |_| {
        if let Err(e) = editor.write().cancel_edit() {
            tracing::debug!("cannot cancel edit: {e}");
        }
    };

    let view = GateView::from_snapshot(&auth());
    let state = editor();
    let editable = state.is_editable();

    let body = match view {
        GateView::Loading => rsx! {
            div { class: "profile-status", "Loading..." }
        },
        GateView::Unavailable(error) => rsx! {
            div {
                class: "profile-status",
                p { class: "text-danger", "We couldn't check your session. {error}" }
                if error.is_retryable() {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| refresh.refresh(),
                        "Retry"
                    }
                }
            }
        },
        GateView::Redirect => rsx! {},
        GateView::Render => {
            let display_name = state
                .synced_user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            let save_error = state.save_error().cloned();
            let retry = save_error.as_ref().is_some_and(|e| e.is_retryable());
            let pending_update = state.has_pending_update();

            rsx! {
                div {
                    class: "profile-header",
                    div {
                        h1 { class: "view-title", "Profile Settings" }
                        p { class: "view-muted", "Manage your account information and preferences" }
                    }
                    div {
                        class: "profile-account",
                        span { class: "view-muted", "{display_name}" }
                        LogoutButton { class: "button button-ghost" }
                    }
                }

                div {
                    class: "profile-grid",

                    div {
                        class: "profile-card profile-card-wide",
                        div {
                            class: "profile-card-header",
                            h2 {
                                class: "view-section-title",
                                Icon { icon: FaUser, width: 14, height: 14 }
                                span { "Personal Information" }
                            }
                            div {
                                class: "flex gap-2",
                                if editable {
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        onclick: handle_cancel,
                                        "Cancel"
                                    }
                                }
                                Button {
                                    variant: ButtonVariant::Primary,
                                    disabled: state.mode() == EditMode::Saving,
                                    onclick: handle_primary,
                                    {match state.mode() {
                                        EditMode::Viewing => rsx! {
                                            Icon { icon: FaPenToSquare, width: 12, height: 12 }
                                            span { "Edit" }
                                        },
                                        EditMode::Editing => rsx! {
                                            Icon { icon: FaFloppyDisk, width: 12, height: 12 }
                                            span { if retry { "Retry" } else { "Save" } }
                                        },
                                        EditMode::Saving => rsx! {
                                            span { "Saving..." }
                                        },
                                    }}
                                }
                            }
                        }

                        if let Some(error) = save_error {
                            div { class: "profile-error", "{error}" }
                        }
                        if pending_update {
                            p { class: "view-muted mb-4", "Your profile changed elsewhere. Cancel to load the latest version." }
                        }

                        {ProfileField::ALL.into_iter().map(|field| {
                            let id = format!("profile-{field:?}").to_lowercase();
                            let label = field.label();
                            let value = state.form().get(field).to_string();
                            let message = state.field_error(field).map(str::to_string);
                            rsx! {
                                div {
                                    key: "{id}",
                                    class: "mb-4",
                                    Label { html_for: id.clone(), "{label}" }
                                    Input {
                                        id: id.clone(),
                                        class: "w-full mt-1.5",
                                        r#type: field.input_type().to_string(),
                                        placeholder: label.to_string(),
                                        value: value,
                                        disabled: !editable,
                                        oninput: move |evt: FormEvent| {
                                            if let Err(e) = editor.write().set_field(field, evt.value()) {
                                                tracing::debug!("ignored input: {e}");
                                            }
                                        },
                                    }
                                    if let Some(message) = message {
                                        p { class: "field-error", "{message}" }
                                    }
                                }
                            }
                        })}
                    }

                    NotificationCard {
                        prefs: prefs(),
                        on_toggle: move |kind| {
                            prefs.write().toggle(kind);
                        },
                    }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page max-w-4xl mx-auto w-full",
            {body}
        }
    }
}
