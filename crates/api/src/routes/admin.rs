//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin::{archive, nav_links, projects, tour_dates, videos};
use crate::handlers::{contact_submissions, settings};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require an admin (enforced by the `RequireAdmin` extractor).
///
/// ```text
/// GET, POST      /projects                       -> list, create
/// PUT, DELETE    /projects/{id}                  -> update, delete
/// (same shape for videos, tour-dates, nav-links,
///  archive-categories, archive-items)
/// PUT            /site-settings                  -> put_site_settings
/// PUT            /about                          -> put_about
/// PUT            /contact-settings               -> put_contact_settings
/// PUT            /footer-settings                -> put_footer_settings
/// GET            /contact-submissions            -> list
/// DELETE         /contact-submissions/{id}       -> delete
/// PUT            /contact-submissions/{id}/read  -> set_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            put(projects::update).delete(projects::delete),
        )
        .route("/videos", get(videos::list).post(videos::create))
        .route("/videos/{id}", put(videos::update).delete(videos::delete))
        .route(
            "/tour-dates",
            get(tour_dates::list).post(tour_dates::create),
        )
        .route(
            "/tour-dates/{id}",
            put(tour_dates::update).delete(tour_dates::delete),
        )
        .route(
            "/archive-categories",
            get(archive::list_categories).post(archive::create_category),
        )
        .route(
            "/archive-categories/{id}",
            put(archive::update_category).delete(archive::delete_category),
        )
        .route(
            "/archive-items",
            get(archive::list_items).post(archive::create_item),
        )
        .route(
            "/archive-items/{id}",
            put(archive::update_item).delete(archive::delete_item),
        )
        .route("/nav-links", get(nav_links::list).post(nav_links::create))
        .route(
            "/nav-links/{id}",
            put(nav_links::update).delete(nav_links::delete),
        )
        .route("/site-settings", put(settings::put_site_settings))
        .route("/about", put(settings::put_about))
        .route("/contact-settings", put(settings::put_contact_settings))
        .route("/footer-settings", put(settings::put_footer_settings))
        .route(
            "/contact-submissions",
            get(contact_submissions::list),
        )
        .route(
            "/contact-submissions/{id}",
            axum::routing::delete(contact_submissions::delete),
        )
        .route(
            "/contact-submissions/{id}/read",
            put(contact_submissions::set_read),
        )
}
