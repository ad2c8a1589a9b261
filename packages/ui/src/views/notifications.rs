use dioxus::prelude::*;

use profile::{NotificationKind, NotificationPrefs};

use crate::icons::FaBell;
use crate::Icon;

/// On/off switches for each notification channel.
#[component]
pub fn NotificationCard(prefs: NotificationPrefs, on_toggle: EventHandler<NotificationKind>) -> Element {
    rsx! {
        div {
            class: "profile-card",
            h2 {
                class: "view-section-title",
                Icon { icon: FaBell, width: 14, height: 14 }
                span { "Notifications" }
            }
            div {
                class: "notification-list",
                {NotificationKind::ALL.into_iter().map(|kind| {
                    let label = kind.label();
                    let on = prefs.get(kind);
                    rsx! {
                        button {
                            key: "{label}",
                            class: "notification-toggle",
                            r#type: "button",
                            aria_pressed: on,
                            onclick: move |_| on_toggle.call(kind),
                            span { "{label}" }
                            span {
                                class: if on { "toggle-state toggle-on" } else { "toggle-state" },
                                if on { "On" } else { "Off" }
                            }
                        }
                    }
                })}
            }
        }
    }
}
