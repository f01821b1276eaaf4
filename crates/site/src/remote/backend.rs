use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use marquee_core::roles::AppRole;
use marquee_core::types::DbId;
use marquee_db::models::about::AboutSection;
use marquee_db::models::archive::ArchiveCategory;
use marquee_db::models::contact_settings::ContactSettings;
use marquee_db::models::footer_settings::FooterSettings;
use marquee_db::models::nav_link::NavLink;
use marquee_db::models::project::Project;
use marquee_db::models::site_settings::SiteSettings;
use marquee_db::models::tour_date::TourDate;
use marquee_db::models::user_role::UserRole;
use marquee_db::models::video::Video;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};

use crate::gate::{
    AuthBackend, AuthError, AuthEvent, AuthResponse, RoleCheck, RoleCheckError, Session,
    SessionChange,
};
use crate::hydration::{ContentSource, SourceError};

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the session-change channel.
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// `{ "data": ... }` response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct HasRoleRequest {
    user_id: DbId,
    role: AppRole,
}

/// Client of the site's REST API.
///
/// Holds the current session in memory and announces every change to it
/// on its own broadcast channel, which is what [`AuthBackend::session_changes`]
/// hands out.
pub struct RemoteBackend {
    base_url: String,
    client: reqwest::Client,
    session: RwLock<Option<Session>>,
    changes: broadcast::Sender<SessionChange>,
}

impl RemoteBackend {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let (changes, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            session: RwLock::new(None),
            changes,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    async fn replace_session(&self, event: AuthEvent, session: Option<Session>) {
        *self.session.write().await = session.clone();
        // A SendError only means nobody is listening.
        let _ = self.changes.send(SessionChange { event, session });
    }

    // -----------------------------------------------------------------------
    // Content reads
    // -----------------------------------------------------------------------

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let response = self
            .client
            .get(self.api_url(path))
            .send()
            .await
            .map_err(|e| SourceError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        response
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    async fn token_request<B: Serialize>(&self, path: &str, body: &B) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(self.api_url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if status.is_client_error() {
            return Err(AuthError::Rejected(error_message(response).await));
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(error_message(response).await));
        }

        let envelope: Envelope<AuthResponse> = response
            .json()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(envelope.data.into_session(Utc::now()))
    }

    /// Exchange the held refresh token for a new session.
    pub async fn refresh_session(&self) -> Result<Session, AuthError> {
        let refresh_token = self
            .session
            .read()
            .await
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
            .ok_or(AuthError::InvalidCredentials)?;

        let session = self
            .token_request(
                "/auth/refresh",
                &RefreshRequest {
                    refresh_token: &refresh_token,
                },
            )
            .await?;
        self.replace_session(AuthEvent::TokenRefreshed, Some(session.clone()))
            .await;
        Ok(session)
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    async fn authorized_data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RoleCheckError> {
        let token = self
            .access_token()
            .await
            .ok_or(RoleCheckError::Unauthenticated)?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RoleCheckError::Backend(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(RoleCheckError::Unauthenticated);
        }
        if !status.is_success() {
            return Err(RoleCheckError::Backend(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_message(response).await
            )));
        }

        response
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| RoleCheckError::Backend(e.to_string()))
    }
}

/// The `error` field of an error body, or the status text.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

#[async_trait]
impl ContentSource for RemoteBackend {
    async fn site_settings(&self) -> Result<Option<SiteSettings>, SourceError> {
        self.get_data("/site-settings").await
    }

    async fn about_section(&self) -> Result<Option<AboutSection>, SourceError> {
        self.get_data("/about").await
    }

    async fn projects(&self) -> Result<Vec<Project>, SourceError> {
        self.get_data("/projects").await
    }

    async fn videos(&self) -> Result<Vec<Video>, SourceError> {
        self.get_data("/videos").await
    }

    async fn tour_dates(&self) -> Result<Vec<TourDate>, SourceError> {
        self.get_data("/tour-dates").await
    }

    async fn archive_categories(&self) -> Result<Vec<ArchiveCategory>, SourceError> {
        self.get_data("/archive-categories").await
    }

    async fn contact_settings(&self) -> Result<Option<ContactSettings>, SourceError> {
        self.get_data("/contact-settings").await
    }

    async fn footer_settings(&self) -> Result<Option<FooterSettings>, SourceError> {
        self.get_data("/footer-settings").await
    }

    async fn nav_links(&self) -> Result<Vec<NavLink>, SourceError> {
        self.get_data("/nav-links").await
    }
}

#[async_trait]
impl AuthBackend for RemoteBackend {
    /// The held session. An expired one is refreshed first; if the refresh
    /// is refused the session is dropped and `None` returned.
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let current = self.session.read().await.clone();
        match current {
            Some(session) if session.is_expired(Utc::now()) && session.refresh_token.is_some() => {
                match self.refresh_session().await {
                    Ok(session) => Ok(Some(session)),
                    Err(AuthError::InvalidCredentials | AuthError::Rejected(_)) => {
                        self.replace_session(AuthEvent::SignedOut, None).await;
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
            other => Ok(other),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .token_request("/auth/sign-in", &Credentials { email, password })
            .await?;
        self.replace_session(AuthEvent::SignedIn, Some(session.clone()))
            .await;
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .token_request("/auth/sign-up", &Credentials { email, password })
            .await?;
        self.replace_session(AuthEvent::SignedIn, Some(session.clone()))
            .await;
        Ok(session)
    }

    /// Revoke the session server-side, then forget it. A token the server
    /// already rejects counts as signed out.
    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(token) = self.access_token().await {
            let response = self
                .client
                .post(self.api_url("/auth/sign-out"))
                .bearer_auth(token)
                .send()
                .await
                .map_err(|e| AuthError::Unavailable(e.to_string()))?;

            let status = response.status();
            if !status.is_success() && status != StatusCode::UNAUTHORIZED {
                return Err(AuthError::Unavailable(error_message(response).await));
            }
        }

        self.replace_session(AuthEvent::SignedOut, None).await;
        Ok(())
    }

    fn session_changes(&self) -> broadcast::Receiver<SessionChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl RoleCheck for RemoteBackend {
    async fn has_role(&self, user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError> {
        let request = self
            .client
            .post(self.api_url("/rpc/has-role"))
            .json(&HasRoleRequest { user_id, role });
        self.authorized_data(request).await
    }

    async fn lookup_role(&self, user_id: DbId, role: AppRole) -> Result<bool, RoleCheckError> {
        let request = self
            .client
            .get(self.api_url("/user-roles"))
            .query(&[("user_id", user_id.to_string()), ("role", role.to_string())]);
        let row: Option<UserRole> = self.authorized_data(request).await?;
        Ok(row.is_some())
    }
}
