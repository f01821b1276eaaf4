//! Admin authorization extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use marquee_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated user the admin check accepts.
///
/// Runs the same chain as the browser gate (allow-list, `has_role`, then
/// `user_roles`), failing closed. Rejects with 401 without a valid token and
/// 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let verdict = state
            .admin_check
            .evaluate(&state.roles(), &user.session_user())
            .await;
        if !verdict.is_admin {
            tracing::debug!(user_id = %user.user_id, decided_by = ?verdict.decided_by, "Admin access denied");
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
