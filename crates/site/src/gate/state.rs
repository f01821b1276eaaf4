use marquee_core::routing::{RouterMode, ADMIN_DASHBOARD_PATH, ADMIN_LOGIN_PATH};
use serde::Serialize;

use super::session::{Session, SessionUser};

/// Where the gate currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The first session lookup has not settled yet.
    Initializing,
    Anonymous,
    AuthenticatedNonAdmin(Session),
    AuthenticatedAdmin(Session),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Initializing)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, AuthState::AuthenticatedAdmin(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::AuthenticatedNonAdmin(session) | AuthState::AuthenticatedAdmin(session) => {
                Some(session)
            }
            AuthState::Initializing | AuthState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session().map(|s| &s.user)
    }

    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            AuthState::Initializing => "initializing",
            AuthState::Anonymous => "anonymous",
            AuthState::AuthenticatedNonAdmin(_) => "authenticated_non_admin",
            AuthState::AuthenticatedAdmin(_) => "authenticated_admin",
        }
    }
}

/// What a protected admin view should do for a given state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Show a loading indicator; render nothing protected.
    Loading,
    /// Send the visitor to the admin login view.
    RedirectToLogin(String),
    /// Signed in but not an admin; render nothing protected.
    Denied,
    Allow,
}

/// Decide whether a protected admin view may render.
pub fn guard(state: &AuthState, mode: RouterMode) -> GuardDecision {
    match state {
        AuthState::Initializing => GuardDecision::Loading,
        AuthState::Anonymous => GuardDecision::RedirectToLogin(mode.href(ADMIN_LOGIN_PATH)),
        AuthState::AuthenticatedNonAdmin(_) => GuardDecision::Denied,
        AuthState::AuthenticatedAdmin(_) => GuardDecision::Allow,
    }
}

/// For the login view: admins are sent on to the dashboard.
pub fn login_redirect(state: &AuthState, mode: RouterMode) -> Option<String> {
    state
        .is_admin()
        .then(|| mode.href(ADMIN_DASHBOARD_PATH))
}
