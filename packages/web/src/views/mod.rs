mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod profile_page;
pub use profile_page::Profile;

use crate::Route;

/// Resolve a configured path to a route, falling back to `fallback`.
pub(crate) fn route_for(path: &str, fallback: Route) -> Route {
    path.parse::<Route>().unwrap_or_else(|_| {
        tracing::warn!("No route matches configured path {path:?}");
        fallback
    })
}
