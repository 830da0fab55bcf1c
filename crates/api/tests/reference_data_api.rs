//! HTTP-level integration tests for categories and genres.
//!
//! The two resources share one surface: public listing, admin-only create
//! and delete-by-slug, and no single-item retrieval or patching (405).

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete, delete_auth, get, patch_json_auth, post_json,
    post_json_auth, token_for,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Both listings are public and start empty.
#[sqlx::test(migrations = "../db/migrations")]
async fn listings_are_public(pool: PgPool) {
    for path in ["/api/v1/categories", "/api/v1/genres"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, path).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().map(Vec::len), Some(0));
    }
}

/// Created entries appear in the listing, newest first, as {name, slug}.
#[sqlx::test(migrations = "../db/migrations")]
async fn listing_returns_created_entries_newest_first(pool: PgPool) {
    let admin = create_test_user(&pool, "admin", "admin").await;
    let token = token_for(&admin);

    for (name, slug) in [("Movies", "movies"), ("Books", "books")] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "name": name, "slug": slug });
        let response = post_json_auth(app, "/api/v1/categories", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories").await;
    let json = body_json(response).await;
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], serde_json::json!({ "name": "Books", "slug": "books" }));
    assert_eq!(items[1], serde_json::json!({ "name": "Movies", "slug": "movies" }));
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Creation requires admin privileges: 401 anonymous, 403 plain user.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_admin(pool: PgPool) {
    let user = create_test_user(&pool, "pleb", "user").await;
    let token = token_for(&user);
    let body = serde_json::json!({ "name": "Movies", "slug": "movies" });

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/genres", body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/genres", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A slug outside the allowed alphabet is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_invalid_slug(pool: PgPool) {
    let admin = create_test_user(&pool, "admin", "admin").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Sci-Fi", "slug": "Sci Fi!" });
    let response = post_json_auth(app, "/api/v1/genres", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A duplicate slug hits the unique constraint and yields 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_duplicate_slug_returns_409(pool: PgPool) {
    let admin = create_test_user(&pool, "admin", "admin").await;
    let token = token_for(&admin);
    let body = serde_json::json!({ "name": "Drama", "slug": "drama" });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/genres", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/genres", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Delete and method restrictions
// ---------------------------------------------------------------------------

/// Delete by slug returns 204, then the entry is gone; unknown slugs 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_by_slug(pool: PgPool) {
    let admin = create_test_user(&pool, "admin", "admin").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Movies", "slug": "movies" });
    let response = post_json_auth(app, "/api/v1/categories", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/categories/movies", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/categories/movies", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting without credentials is 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/categories/movies").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Single-item GET and PATCH are not part of the surface and answer 405.
#[sqlx::test(migrations = "../db/migrations")]
async fn single_item_get_and_patch_return_405(pool: PgPool) {
    let admin = create_test_user(&pool, "admin", "admin").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Movies", "slug": "movies" });
    let response = post_json_auth(app, "/api/v1/categories", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/categories/movies").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Films" });
    let response = patch_json_auth(app, "/api/v1/categories/movies", body, &token).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
