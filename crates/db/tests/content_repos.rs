//! Repository tests against a real database.
//!
//! These need `DATABASE_URL` pointing at a Postgres instance the test harness
//! may create databases on; run them with `cargo test -- --ignored`.

use marquee_core::roles::AppRole;
use marquee_db::models::about::{AboutStat, UpsertAboutSection};
use marquee_db::models::archive::CreateArchiveCategory;
use marquee_db::models::project::{CreateProject, UpdateProject};
use marquee_db::models::user::CreateUser;
use marquee_db::models::video::{CreateVideo, UpdateVideo};
use marquee_db::repositories::{
    AboutSectionRepo, ArchiveCategoryRepo, ProjectRepo, UserRepo, UserRoleRepo, VideoRepo,
};
use sqlx::postgres::PgListener;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(title: &str, sort_order: i32, is_visible: bool) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: None,
        image_url: None,
        link_url: None,
        link_text: None,
        category: None,
        is_featured: None,
        is_visible: Some(is_visible),
        sort_order: Some(sort_order),
    }
}

fn new_video(url: &str) -> CreateVideo {
    CreateVideo {
        title: "Clip".to_string(),
        youtube_url: Some(url.to_string()),
        thumbnail_url: None,
        watermark_url: None,
        duration: None,
        views: None,
        is_featured: None,
        is_visible: None,
        sort_order: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_visible_filters_and_orders(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project("third", 3, true)).await.unwrap();
    ProjectRepo::create(&pool, &new_project("hidden", 0, false)).await.unwrap();
    ProjectRepo::create(&pool, &new_project("first", 1, true)).await.unwrap();

    let titles: Vec<String> = ProjectRepo::list_visible(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["first", "third"]);

    assert_eq!(ProjectRepo::list_all(&pool).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_applies_only_present_fields(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Tour film", 1, true)).await.unwrap();
    let update = UpdateProject {
        is_visible: Some(false),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, project.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.title, "Tour film");
    assert!(!updated.is_visible);
    assert!(ProjectRepo::list_visible(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn singleton_upsert_keeps_one_row(pool: PgPool) {
    assert!(AboutSectionRepo::find(&pool).await.unwrap().is_none());

    let mut input = UpsertAboutSection {
        title: "About".to_string(),
        ..Default::default()
    };
    let first = AboutSectionRepo::upsert(&pool, &input).await.unwrap();

    input.title = "About me".to_string();
    input.stats = vec![AboutStat {
        value: "10M+".to_string(),
        label: "Views".to_string(),
    }];
    let second = AboutSectionRepo::upsert(&pool, &input).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "About me");
    assert_eq!(second.stats.0.len(), 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM about_section")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn video_embed_id_is_derived_on_write(pool: PgPool) {
    let video = VideoRepo::create(&pool, &new_video("https://youtu.be/dQw4w9WgXcQ"))
        .await
        .unwrap();
    assert_eq!(video.youtube_embed_id.as_deref(), Some("dQw4w9WgXcQ"));

    let update = UpdateVideo {
        youtube_url: Some("https://example.com/not-youtube".to_string()),
        ..Default::default()
    };
    let updated = VideoRepo::update(&pool, video.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.youtube_embed_id, None);

    let update = UpdateVideo {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let renamed = VideoRepo::update(&pool, video.id, &update).await.unwrap().unwrap();
    assert_eq!(renamed.youtube_embed_id, None);
    assert_eq!(renamed.title, "Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_archive_slug_is_a_unique_violation(pool: PgPool) {
    let input = CreateArchiveCategory {
        title: "Early Work".to_string(),
        slug: None,
        description: None,
        cover_image_url: None,
        link_url: None,
        year: None,
        is_visible: None,
        sort_order: None,
    };
    ArchiveCategoryRepo::create(&pool, &input, "early-work").await.unwrap();
    let err = ArchiveCategoryRepo::create(&pool, &input, "early-work")
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_archive_categories_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn has_role_and_table_lookup_agree(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "artist@example.com".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(!UserRoleRepo::has_role(&pool, user.id, AppRole::Admin).await.unwrap());
    assert!(UserRoleRepo::find(&pool, user.id, AppRole::Admin).await.unwrap().is_none());

    assert!(UserRoleRepo::grant_admin_by_email(&pool, "Artist@Example.com").await.unwrap());

    assert!(UserRoleRepo::has_role(&pool, user.id, AppRole::Admin).await.unwrap());
    let role = UserRoleRepo::find(&pool, user.id, AppRole::Admin).await.unwrap().unwrap();
    assert_eq!(role.role, "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn content_writes_notify_listeners(pool: PgPool) {
    let mut listener = PgListener::connect_with(&pool).await.unwrap();
    listener.listen("content_changes").await.unwrap();

    let project = ProjectRepo::create(&pool, &new_project("Notify", 0, true)).await.unwrap();

    let notification = listener.recv().await.unwrap();
    let payload: serde_json::Value = serde_json::from_str(notification.payload()).unwrap();
    assert_eq!(payload["table"], "projects");
    assert_eq!(payload["op"], "INSERT");
    assert_eq!(payload["id"], project.id.to_string());
}
