//! Route gating policy.
//!
//! A declarative decision table mapping a requested path class and the current
//! session state to the action a caller must take. The table is pure and
//! synchronous so it can run before any page is produced, and it is shared by
//! the request-time guard and the client guard; only the side effects (how a
//! redirect is issued, how a cookie is cleared) differ per runtime.

use crate::session::SessionState;

/// Path of the login page; unauthenticated and non-admin traffic lands here.
pub const LOGIN_PATH: &str = "/login";

/// Dashboard root; authenticated admins are sent here from auth pages.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Classification of a requested path for gating purposes.
///
/// The auth set and the protected set are disjoint by construction, which is
/// what keeps the guard free of redirect loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Login and forgot-password pages.
    Auth,
    /// The dashboard root and everything under it.
    Protected,
    /// Everything else passes through untouched.
    Public,
}

impl PathClass {
    /// Classifies a request path.
    #[must_use]
    pub fn of(path: &str) -> Self {
        match path {
            "/login" | "/forgot-password" => Self::Auth,
            "/" | "/dashboard" => Self::Protected,
            _ if path.starts_with("/dashboard/") => Self::Protected,
            _ => Self::Public,
        }
    }
}

/// Action the caller must take for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render or pass through the requested path.
    Allow,
    /// Redirect to the login page. `clear_cookie` is set when the session
    /// cookie held an expired token and must not be presented again.
    RedirectToLogin { clear_cookie: bool },
    /// Redirect an authenticated admin away from an auth page.
    RedirectToDashboard,
}

/// Applies the gating table to a path and session state. First match wins.
#[must_use]
pub fn decide(path: &str, session: &SessionState) -> RouteDecision {
    let expired = matches!(session, SessionState::Expired);
    match (PathClass::of(path), session.is_admin()) {
        (PathClass::Auth, true) => RouteDecision::RedirectToDashboard,
        (PathClass::Auth, false) => RouteDecision::Allow,
        (PathClass::Protected, true) => RouteDecision::Allow,
        (PathClass::Protected, false) => RouteDecision::RedirectToLogin {
            clear_cookie: expired,
        },
        (PathClass::Public, _) => RouteDecision::Allow,
    }
}
