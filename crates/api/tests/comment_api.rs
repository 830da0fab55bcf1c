//! HTTP-level integration tests for comments.
//!
//! Covers the full title/review/comment nesting, 404s on mismatched scoping,
//! and the author/moderator mutation permissions.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get, patch_json_auth, post_json, post_json_auth,
    token_for,
};
use revue_core::types::DbId;
use revue_db::models::title::CreateTitle;
use revue_db::models::user::User;
use revue_db::repositories::{ReviewRepo, TitleRepo};
use sqlx::PgPool;

/// Insert a title and a review by the given author, returning both ids.
async fn seed_title_with_review(pool: &PgPool, author: &User) -> (DbId, DbId) {
    let title = TitleRepo::create(
        pool,
        &CreateTitle {
            name: "Commented".to_string(),
            year: 2000,
            description: String::new(),
            category_id: None,
            genre_ids: Vec::new(),
        },
    )
    .await
    .unwrap();
    let review = ReviewRepo::create(pool, title.id, author.id, "review text", 5)
        .await
        .unwrap();
    (title.id, review.id)
}

/// Create a comment through the API and return its JSON representation.
async fn create_comment_via_api(
    pool: &PgPool,
    title_id: DbId,
    review_id: DbId,
    token: &str,
    text: &str,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "text": text });
    let response = post_json_auth(
        app,
        &format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments"),
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create and list
// ---------------------------------------------------------------------------

/// A created comment carries the author's username.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_comment(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let bob = create_test_user(&pool, "bob", "user").await;
    let (title_id, review_id) = seed_title_with_review(&pool, &alice).await;

    let json = create_comment_via_api(&pool, title_id, review_id, &token_for(&bob), "agreed").await;

    assert_eq!(json["author"], "bob");
    assert_eq!(json["text"], "agreed");
    assert!(json["pub_date"].is_string());
}

/// Commenting requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_comment_requires_auth(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let (title_id, review_id) = seed_title_with_review(&pool, &alice).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "text": "anon" });
    let response = post_json(
        app,
        &format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Comments list publicly in ascending publication order.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_comments_in_publication_order(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let bob = create_test_user(&pool, "bob", "user").await;
    let (title_id, review_id) = seed_title_with_review(&pool, &alice).await;

    create_comment_via_api(&pool, title_id, review_id, &token_for(&alice), "first").await;
    create_comment_via_api(&pool, title_id, review_id, &token_for(&bob), "second").await;

    let app = common::build_test_app(pool);
    let json = body_json(
        get(
            app,
            &format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments"),
        )
        .await,
    )
    .await;
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "first");
    assert_eq!(items[1]["text"], "second");
}

// ---------------------------------------------------------------------------
// Scoping
// ---------------------------------------------------------------------------

/// A comment reached through the wrong review 404s even though it exists.
#[sqlx::test(migrations = "../db/migrations")]
async fn comment_scoped_to_its_review(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let bob = create_test_user(&pool, "bob", "user").await;
    let (title_id, review_a) = seed_title_with_review(&pool, &alice).await;
    // A second review on the same title, by a different author.
    let review_b = ReviewRepo::create(&pool, title_id, bob.id, "other", 6)
        .await
        .unwrap()
        .id;

    let comment =
        create_comment_via_api(&pool, title_id, review_a, &token_for(&alice), "on A").await;
    let comment_id = comment["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(
        app,
        &format!("/api/v1/titles/{title_id}/reviews/{review_a}/comments/{comment_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/titles/{title_id}/reviews/{review_b}/comments/{comment_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A review reached through the wrong title 404s before comments resolve.
#[sqlx::test(migrations = "../db/migrations")]
async fn comment_routes_check_title_scoping(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let (_title_id, review_id) = seed_title_with_review(&pool, &alice).await;
    let other_title = TitleRepo::create(
        &pool,
        &CreateTitle {
            name: "Other".to_string(),
            year: 2001,
            description: String::new(),
            category_id: None,
            genre_ids: Vec::new(),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!(
            "/api/v1/titles/{}/reviews/{review_id}/comments",
            other_title.id
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Mutation permissions
// ---------------------------------------------------------------------------

/// The author can patch their own comment; an unrelated user cannot.
#[sqlx::test(migrations = "../db/migrations")]
async fn patch_comment_author_only_for_plain_users(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let mallory = create_test_user(&pool, "mallory", "user").await;
    let (title_id, review_id) = seed_title_with_review(&pool, &alice).await;

    let comment =
        create_comment_via_api(&pool, title_id, review_id, &token_for(&alice), "mine").await;
    let comment_id = comment["id"].as_i64().unwrap();
    let uri = format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "text": "defaced" });
    let response = patch_json_auth(app, &uri, body, &token_for(&mallory)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "text": "edited" });
    let response = patch_json_auth(app, &uri, body, &token_for(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "edited");
}

/// Moderators may delete any comment.
#[sqlx::test(migrations = "../db/migrations")]
async fn moderator_can_delete_any_comment(pool: PgPool) {
    let alice = create_test_user(&pool, "alice", "user").await;
    let moderator = create_test_user(&pool, "mod", "moderator").await;
    let (title_id, review_id) = seed_title_with_review(&pool, &alice).await;

    let comment =
        create_comment_via_api(&pool, title_id, review_id, &token_for(&alice), "gone soon").await;
    let comment_id = comment["id"].as_i64().unwrap();
    let uri = format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token_for(&moderator)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
