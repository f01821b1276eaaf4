//! Public content reads, merged directly under `/api/v1`.

use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", get(content::snapshot))
        .route("/site-settings", get(content::site_settings))
        .route("/about", get(content::about))
        .route("/contact-settings", get(content::contact_settings))
        .route("/footer-settings", get(content::footer_settings))
        .route("/projects", get(content::projects))
        .route("/videos", get(content::videos))
        .route("/tour-dates", get(content::tour_dates))
        .route("/archive-categories", get(content::archive_categories))
        .route("/archive-categories/{slug}/items", get(content::archive_items))
        .route("/nav-links", get(content::nav_links))
}
