//! Route definitions for categories.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list_categories (public)
/// POST   /        -> create_category (admin only)
/// DELETE /{slug}  -> delete_category (admin only)
/// ```
///
/// `GET /{slug}` and `PATCH /{slug}` are not registered and answer 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/{slug}", delete(categories::delete_category))
}
