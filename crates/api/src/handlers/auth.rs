//! Handlers for the `/auth` resource (sign-up, sign-in, refresh, sign-out,
//! session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use marquee_core::error::CoreError;
use marquee_core::routing::ADMIN_DASHBOARD_PATH;
use marquee_db::models::session::CreateSession;
use marquee_db::models::user::{CreateUser, User};
use marquee_db::repositories::{SessionRepo, UserRepo};
use marquee_site::gate::{AuthResponse, SessionUser, Verdict};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/sign-up` and `POST /auth/sign-in`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response of `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: SessionUser,
    pub is_admin: bool,
    pub verdict: Verdict,
    /// Where the login view should send this user, if anywhere.
    pub redirect_to: Option<String>,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-up
///
/// Create an account and return a session. 409 if the email is taken.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(mut input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    input.email = input.email.trim().to_lowercase();
    input
        .validate()
        .map_err(|_| AppError::Core(CoreError::Validation("A valid email is required".into())))?;
    validate_password_strength(&input.password, state.config.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "Account created");

    let response = create_auth_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = %user.id, "Sign-in rejected");
        return Err(invalid_credentials());
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new token pair. The old session is
/// revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/sign-out
///
/// Revoke every session of the caller. Returns 204.
pub async fn sign_out(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = %auth_user.user_id, revoked, "Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// The caller and the admin check's verdict on them.
pub async fn session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let user = auth_user.session_user();
    let verdict = state.admin_check.evaluate(&state.roles(), &user).await;
    let redirect_to = verdict
        .is_admin
        .then(|| state.config.router_mode.href(ADMIN_DASHBOARD_PATH));

    Ok(Json(DataResponse {
        data: SessionInfo {
            user,
            is_admin: verdict.is_admin,
            verdict,
            redirect_to,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token pair, persist the session row, and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.email, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent: None,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        token_type: "Bearer".to_string(),
        expires_in: jwt.access_token_ttl_secs(),
        user: SessionUser {
            id: user.id,
            email: user.email.clone(),
        },
    })
}
