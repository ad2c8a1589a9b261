//! # Auth gate
//!
//! Maps the auth source's state onto what the page may render:
//!
//! | `loading` | user | error | [`GateView`] |
//! |-----------|------|-------|--------------|
//! | `true` | any | any | `Loading` |
//! | `false` | none | some | `Unavailable` (retry, no redirect) |
//! | `false` | none | none | `Redirect` |
//! | `false` | some | any | `Render` |
//!
//! [`AuthGate`] adds the navigation side effect on top: it calls the router
//! once when the state enters `Redirect` and stays quiet until the state has
//! left it again, however many times it is re-evaluated in between.

use crate::error::ProfileError;
use crate::models::UserRecord;

/// Router capability consumed by the gate.
pub trait Navigate {
    fn navigate(&mut self, path: &str);
}

impl<F: FnMut(&str)> Navigate for F {
    fn navigate(&mut self, path: &str) {
        self(path)
    }
}

/// Point-in-time view of the auth source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub user: Option<UserRecord>,
    pub loading: bool,
    /// Set when the last attempt to resolve the user failed.
    pub error: Option<ProfileError>,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// What the page renders for a given snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateView {
    Loading,
    Unavailable(ProfileError),
    Redirect,
    Render,
}

impl GateView {
    pub fn from_snapshot(snapshot: &AuthSnapshot) -> Self {
        if snapshot.loading {
            return Self::Loading;
        }
        match (&snapshot.user, &snapshot.error) {
            (Some(_), _) => Self::Render,
            (None, Some(error)) => Self::Unavailable(error.clone()),
            (None, None) => Self::Redirect,
        }
    }
}

/// Redirects unauthenticated visitors to the login route, once per transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthGate {
    login_path: String,
    redirected: bool,
}

impl AuthGate {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            redirected: false,
        }
    }

    /// Evaluate `snapshot`, navigating to the login route if this is a fresh
    /// transition into the unauthenticated state.
    pub fn evaluate(&mut self, snapshot: &AuthSnapshot, nav: &mut impl Navigate) -> GateView {
        let view = GateView::from_snapshot(snapshot);
        match view {
            GateView::Redirect if !self.redirected => {
                tracing::debug!(path = %self.login_path, "unauthenticated, redirecting");
                self.redirected = true;
                nav.navigate(&self.login_path);
            }
            GateView::Redirect => {}
            _ => self.redirected = false,
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(loading: bool, user: bool, error: Option<&str>) -> AuthSnapshot {
        AuthSnapshot {
            user: user.then(|| UserRecord {
                id: "u1".into(),
                ..Default::default()
            }),
            loading,
            error: error.map(|e| ProfileError::AuthUnavailable(e.into())),
        }
    }

    #[test]
    fn test_loading_wins() {
        for user in [false, true] {
            for error in [None, Some("boom")] {
                assert_eq!(
                    GateView::from_snapshot(&snapshot(true, user, error)),
                    GateView::Loading
                );
            }
        }
    }

    #[test]
    fn test_views() {
        assert_eq!(GateView::from_snapshot(&snapshot(false, true, None)), GateView::Render);
        assert_eq!(GateView::from_snapshot(&snapshot(false, false, None)), GateView::Redirect);
        assert_eq!(
            GateView::from_snapshot(&snapshot(false, false, Some("offline"))),
            GateView::Unavailable(ProfileError::AuthUnavailable("offline".into()))
        );
    }

    #[test]
    fn test_redirects_exactly_once() {
        let mut gate = AuthGate::new("/login");
        let mut calls = Vec::new();
        let mut nav = |path: &str| calls.push(path.to_string());

        assert_eq!(gate.evaluate(&snapshot(true, false, None), &mut nav), GateView::Loading);
        for _ in 0..3 {
            assert_eq!(gate.evaluate(&snapshot(false, false, None), &mut nav), GateView::Redirect);
        }
        drop(nav);
        assert_eq!(calls, vec!["/login".to_string()]);
    }

    #[test]
    fn test_rearms_after_leaving_unauthenticated() {
        let mut gate = AuthGate::new("/login");
        let mut count = 0;
        let mut nav = |_: &str| count += 1;

        gate.evaluate(&snapshot(false, false, None), &mut nav);
        gate.evaluate(&snapshot(false, true, None), &mut nav);
        gate.evaluate(&snapshot(false, false, None), &mut nav);
        drop(nav);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_unavailable_does_not_redirect() {
        let mut gate = AuthGate::new("/login");
        let mut count = 0;
        let mut nav = |_: &str| count += 1;

        gate.evaluate(&snapshot(false, false, Some("offline")), &mut nav);
        drop(nav);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_unavailable_error_is_retryable() {
        let GateView::Unavailable(error) =
            GateView::from_snapshot(&snapshot(false, false, Some("connection refused")))
        else {
            panic!("expected the unavailable view");
        };
        assert!(error.is_retryable());
        assert_eq!(
            error.to_string(),
            "authentication unavailable: connection refused"
        );
    }
}
