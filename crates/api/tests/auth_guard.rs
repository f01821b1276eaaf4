//! Authentication, admin gating and request validation: everything that is
//! decided before a query reaches the database.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, get_authed, post_json, send, token_for, ADMIN_EMAIL};
use serde_json::json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Bearer authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_route_without_token_is_401() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/admin/projects").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = common::build_test_app();
    let response = get_authed(app, "/api/v1/auth/session", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn sign_out_requires_token() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/auth/sign-out", None, json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Admin check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn allow_listed_session_is_admin_without_role_lookup() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), ADMIN_EMAIL);

    let response = get_authed(app, "/api/v1/auth/session", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], ADMIN_EMAIL);
    assert_eq!(json["data"]["is_admin"], true);
    assert_eq!(json["data"]["verdict"]["decided_by"], "allow_list");
    assert_eq!(json["data"]["redirect_to"], "/admin");
}

#[tokio::test]
async fn unreachable_role_store_fails_closed() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), "fan@example.com");

    let response = get_authed(app, "/api/v1/auth/session", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_admin"], false);
    assert!(json["data"]["verdict"]["decided_by"].is_null());
    assert!(json["data"]["redirect_to"].is_null());
}

#[tokio::test]
async fn non_admin_is_forbidden_from_admin_routes() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), "fan@example.com");

    let response = send(
        app,
        Method::DELETE,
        &format!("/api/v1/admin/projects/{}", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin role required");
}

#[tokio::test]
async fn allow_listed_admin_passes_the_gate() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), ADMIN_EMAIL);

    let response = get_authed(app, "/api/v1/admin/projects", &token).await;

    // Past the gate the handler hits the (absent) database.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn role_lookup_for_another_user_requires_admin() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), "fan@example.com");

    let response = post_json(
        app,
        "/api/v1/rpc/has-role",
        Some(&token),
        json!({ "user_id": Uuid::new_v4(), "role": "admin" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Validation before persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_contact_submission_is_400() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/contact",
        None,
        json!({ "name": "  ", "email": "not-an-email", "message": "Hello" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid contact fields: email, name");
}

#[tokio::test]
async fn sign_up_rejects_short_password() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/auth/sign-up",
        None,
        json!({ "email": "new@example.com", "password": "short" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn sign_up_rejects_malformed_email() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/auth/sign-up",
        None,
        json!({ "email": "nobody", "password": "long-enough-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "A valid email is required");
}

#[tokio::test]
async fn blank_site_name_is_rejected() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), ADMIN_EMAIL);

    let response = send(
        app,
        Method::PUT,
        "/api/v1/admin/site-settings",
        Some(&token),
        Some(json!({ "site_name": "   " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn untitled_archive_category_without_slug_is_rejected() {
    let app = common::build_test_app();
    let token = token_for(Uuid::new_v4(), ADMIN_EMAIL);

    let response = post_json(
        app,
        "/api/v1/admin/archive-categories",
        Some(&token),
        json!({ "title": "!!!" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Slug must contain at least one letter or digit");
}
