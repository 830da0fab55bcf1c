//! Route definitions for user management.
//!
//! `/me` is registered before `{username}` but matchit gives static segments
//! priority regardless, so a user literally named "me" can never be reached
//! (registration of that username is rejected at signup).

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /            -> list_users (admin only)
/// POST   /            -> create_user (admin only)
/// GET    /me          -> get_me
/// PATCH  /me          -> patch_me
/// GET    /{username}  -> get_user (admin only)
/// PATCH  /{username}  -> patch_user (admin only)
/// DELETE /{username}  -> delete_user (admin only)
/// ```
///
/// `PUT /{username}` is not registered and therefore answers 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/me", get(users::get_me).patch(users::patch_me))
        .route(
            "/{username}",
            get(users::get_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
}
