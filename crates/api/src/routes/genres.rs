//! Route definitions for genres.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::genres;
use crate::state::AppState;

/// Genre routes mounted at `/genres`.
///
/// ```text
/// GET    /        -> list_genres (public)
/// POST   /        -> create_genre (admin only)
/// DELETE /{slug}  -> delete_genre (admin only)
/// ```
///
/// `GET /{slug}` and `PATCH /{slug}` are not registered and answer 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list_genres).post(genres::create_genre))
        .route("/{slug}", delete(genres::delete_genre))
}
