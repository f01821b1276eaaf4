pub mod admin;
pub mod auth;
pub mod content;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /realtime?tables=a,b                             WebSocket change feed
///
/// /content                                         aggregated snapshot (public)
/// /site-settings, /about, /contact-settings,
/// /footer-settings                                 singleton reads (public)
/// /projects, /videos, /tour-dates,
/// /archive-categories, /nav-links                  visible rows in order (public)
/// /archive-categories/{slug}/items                 visible items of a category
///
/// /contact                                         submit the contact form (POST)
///
/// /auth/sign-up, /auth/sign-in                     obtain a session (public)
/// /auth/refresh                                    rotate refresh token (public)
/// /auth/sign-out                                   revoke sessions (auth)
/// /auth/session                                    caller + admin verdict (auth)
///
/// /rpc/has-role                                    role-check procedure (auth)
/// /user-roles?user_id=&role=                       role-table lookup (auth)
///
/// /admin/projects, /admin/videos,
/// /admin/tour-dates, /admin/nav-links,
/// /admin/archive-categories, /admin/archive-items  list, create (admin)
/// /admin/{collection}/{id}                         update, delete (admin)
/// /admin/site-settings, /admin/about,
/// /admin/contact-settings, /admin/footer-settings  upsert (PUT, admin)
/// /admin/contact-submissions                       list (admin)
/// /admin/contact-submissions/{id}                  delete (admin)
/// /admin/contact-submissions/{id}/read             mark read/unread (PUT, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Realtime change feed.
        .route("/realtime", get(ws::realtime_handler))
        // Public content reads.
        .merge(content::router())
        .route("/contact", post(handlers::contact::submit))
        // Sessions.
        .nest("/auth", auth::router())
        // Role checks used by the auth gate.
        .route("/rpc/has-role", post(handlers::roles::has_role))
        .route("/user-roles", get(handlers::roles::find_user_role))
        // Content management.
        .nest("/admin", admin::router())
}
