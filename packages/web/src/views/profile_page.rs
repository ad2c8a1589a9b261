use dioxus::prelude::*;
use ui::views::ProfileView;

use super::route_for;
use crate::Route;

/// Profile settings route; sends signed-out visitors to the login route.
#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();

    rsx! {
        ProfileView {
            on_redirect: move |path: String| {
                nav.replace(route_for(&path, Route::Login {}));
            },
        }
    }
}
