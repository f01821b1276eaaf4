use chrono::{Duration, Utc};
use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// The signed-in user as the session describes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: DbId,
    pub email: String,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub user: SessionUser,
}

impl Session {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Why the session changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// A session change pushed by the auth backend. `session` is `None` after a
/// sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

/// Token pair returned by the sign-in, sign-up and refresh endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

impl AuthResponse {
    pub fn into_session(self, now: Timestamp) -> Session {
        Session {
            expires_at: Some(now + Duration::seconds(self.expires_in)),
            access_token: self.access_token,
            refresh_token: Some(self.refresh_token),
            user: self.user,
        }
    }

    pub fn into_session_now(self) -> Session {
        self.into_session(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn auth_response_sets_expiry_from_lifetime() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let session = AuthResponse {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            user: SessionUser {
                id: DbId::nil(),
                email: "a@example.com".to_string(),
            },
        }
        .into_session(now);

        assert_eq!(session.expires_at, Some(now + Duration::hours(1)));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));
    }
}
