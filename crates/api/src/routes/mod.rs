pub mod auth;
pub mod categories;
pub mod genres;
pub mod health;
pub mod titles;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/token                                      token exchange (public)
///
/// /users                                           list, create (admin only)
/// /users/me                                        own profile (get, patch)
/// /users/{username}                                get, patch, delete (admin only)
///
/// /categories                                      list (public), create (admin)
/// /categories/{slug}                               delete (admin)
///
/// /genres                                          list (public), create (admin)
/// /genres/{slug}                                   delete (admin)
///
/// /titles                                          list (public), create (admin)
/// /titles/{id}                                     get, patch, delete
/// /titles/{title_id}/reviews                       list, create
/// /titles/{title_id}/reviews/{id}                  get, patch, delete
/// /titles/{title_id}/reviews/{review_id}/comments  list, create
/// /titles/{title_id}/reviews/{review_id}/comments/{id}  get, patch, delete
/// ```
///
/// Unsupported methods on a matched path (e.g. `PUT /titles/{id}` or
/// `GET /categories/{slug}`) fall through to Axum's automatic 405.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Signup and confirmation-code token exchange.
        .nest("/auth", auth::router())
        // Own profile plus the admin user surface.
        .nest("/users", users::router())
        // Reference data: categories and genres.
        .nest("/categories", categories::router())
        .nest("/genres", genres::router())
        // Titles with nested reviews and comments.
        .nest("/titles", titles::router())
}
