use async_trait::async_trait;
use marquee_core::roles::AppRole;
use marquee_core::types::DbId;
use tokio::sync::broadcast;

use super::session::{Session, SessionChange};

/// A described sign-in, sign-up or sign-out failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The backend refused the request and said why (weak password, email
    /// already registered, ...).
    #[error("{0}")]
    Rejected(String),

    #[error("Auth backend unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a role-check call. The admin check treats any of these as
/// "no answer" and moves on to its next step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleCheckError {
    #[error("Role check requires a signed-in session")]
    Unauthenticated,

    #[error("Role check failed: {0}")]
    Backend(String),

    #[error("Role check timed out")]
    Timeout,
}

/// Session storage and sign-in/out operations of the auth backend.
#[async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    /// The session currently held, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// A fresh receiver of every session change from now on.
    fn session_changes(&self) -> broadcast::Receiver<SessionChange>;
}

/// The two ways of asking whether a user holds a role.
#[async_trait]
pub trait RoleCheck: Send + Sync + 'static {
    /// The `has_role` remote procedure.
    async fn has_role(&self, user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError>;

    /// Direct lookup in the role table; `true` when an assignment row exists.
    async fn lookup_role(&self, user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError>;
}
