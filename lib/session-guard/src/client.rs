//! Client-side session guard.
//!
//! The counterpart of the request-time guard that lives inside the running
//! dashboard: it owns the long-lived client session value, re-derives it from
//! the cookie on every navigation, and issues redirects through an injected
//! navigator. Side effects go through the [`CookieStore`] and [`Navigator`]
//! traits so the guard itself stays runtime-agnostic and testable; the
//! browser shell supplies `document.cookie`- and history-backed
//! implementations.

use chrono::Utc;

use crate::policy::{DASHBOARD_PATH, LOGIN_PATH, RouteDecision, decide};
use crate::role::Role;
use crate::session::SessionState;

/// Read and clear access to the jar holding the session cookie.
pub trait CookieStore {
    /// Returns the raw value of the session cookie, if set.
    fn session_cookie(&self) -> Option<String>;

    /// Deletes the session cookie (`Max-Age=0` semantics).
    fn clear_session_cookie(&self);
}

/// Navigation side effects issued by the guard.
///
/// The guard only ever replaces the current history entry; a gating redirect
/// must not leave the rejected path reachable via the back button.
pub trait Navigator {
    /// Replaces the current history entry with `path`.
    fn replace(&self, path: &str);
}

/// Session holder and route guard for the client runtime.
///
/// Constructed once at application start and handed to dependent UI by
/// reference; there is no module-global session. `loading` is true only
/// between construction and the first [`handle_navigation`] call, which the
/// shell invokes synchronously on mount.
///
/// [`handle_navigation`]: ClientGuard::handle_navigation
#[derive(Debug)]
pub struct ClientGuard<C, N> {
    cookies: C,
    navigator: N,
    session: SessionState,
    loading: bool,
    logout_in_flight: bool,
}

impl<C: CookieStore, N: Navigator> ClientGuard<C, N> {
    /// Creates a guard that has not yet evaluated the cookie.
    #[must_use]
    pub fn new(cookies: C, navigator: N) -> Self {
        Self {
            cookies,
            navigator,
            session: SessionState::Anonymous,
            loading: true,
            logout_in_flight: false,
        }
    }

    /// Recomputes the session for `path` and applies the gating policy.
    ///
    /// Called on mount and on every path change. The recompute and the
    /// decision run inside this single synchronous call, so a redirect is
    /// never issued against a role computed for a previous path. Expiry is
    /// only checked here; between two navigations a token may go stale-valid
    /// in memory until the next trigger fires.
    pub fn handle_navigation(&mut self, path: &str) {
        // A completed navigation ends any pending logout.
        self.logout_in_flight = false;

        let cookie = self.cookies.session_cookie();
        let session = SessionState::evaluate(cookie.as_deref(), Utc::now());

        match decide(path, &session) {
            RouteDecision::Allow => {}
            RouteDecision::RedirectToLogin { clear_cookie } => {
                // Beyond the shared table: a non-admin must not retain a
                // protected-area session client-side even though the edge
                // only clears expired cookies.
                if clear_cookie || session.is_authenticated() {
                    self.cookies.clear_session_cookie();
                }
                self.navigator.replace(LOGIN_PATH);
            }
            RouteDecision::RedirectToDashboard => {
                self.navigator.replace(DASHBOARD_PATH);
            }
        }

        // The held session mirrors the cookie lifecycle: absent, expired, or
        // malformed all collapse to no session.
        self.session = match session {
            SessionState::Expired => SessionState::Anonymous,
            other => other,
        };
        self.loading = false;
    }

    /// Clears the cookie and in-memory session, then navigates to the login
    /// page.
    ///
    /// At most one logout is in flight: repeat invocations before the next
    /// navigation event are no-ops, so a double-click cannot race two
    /// clear-and-redirect sequences.
    pub fn logout(&mut self) {
        if self.logout_in_flight {
            return;
        }
        self.logout_in_flight = true;

        self.cookies.clear_session_cookie();
        self.session = SessionState::Anonymous;
        self.navigator.replace(LOGIN_PATH);
    }

    /// Returns the current session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the current session role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.session.role()
    }

    /// True only before the first navigation has been handled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
