//! Route definitions for titles and their nested reviews and comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comments, reviews, titles};
use crate::state::AppState;

/// Title routes mounted at `/titles`, including the nested review and
/// comment sub-resources.
///
/// ```text
/// GET    /                                          -> list_titles (public)
/// POST   /                                          -> create_title (admin only)
/// GET    /{title_id}                                -> get_title (public)
/// PATCH  /{title_id}                                -> patch_title (admin only)
/// DELETE /{title_id}                                -> delete_title (admin only)
///
/// GET    /{title_id}/reviews                        -> list_reviews (public)
/// POST   /{title_id}/reviews                        -> create_review
/// GET    /{title_id}/reviews/{review_id}            -> get_review (public)
/// PATCH  /{title_id}/reviews/{review_id}            -> patch_review
/// DELETE /{title_id}/reviews/{review_id}            -> delete_review
///
/// GET    /{title_id}/reviews/{review_id}/comments               -> list_comments (public)
/// POST   /{title_id}/reviews/{review_id}/comments               -> create_comment
/// GET    /{title_id}/reviews/{review_id}/comments/{comment_id}  -> get_comment (public)
/// PATCH  /{title_id}/reviews/{review_id}/comments/{comment_id}  -> patch_comment
/// DELETE /{title_id}/reviews/{review_id}/comments/{comment_id}  -> delete_comment
/// ```
///
/// `PUT /{title_id}` is not registered and answers 405.
///
/// The title segment uses the same parameter name on every route; matchit
/// rejects mismatched wildcard names at the same position.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(titles::list_titles).post(titles::create_title))
        .route(
            "/{title_id}",
            get(titles::get_title)
                .patch(titles::patch_title)
                .delete(titles::delete_title),
        )
        .route(
            "/{title_id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/{title_id}/reviews/{review_id}",
            get(reviews::get_review)
                .patch(reviews::patch_review)
                .delete(reviews::delete_review),
        )
        .route(
            "/{title_id}/reviews/{review_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/{title_id}/reviews/{review_id}/comments/{comment_id}",
            get(comments::get_comment)
                .patch(comments::patch_comment)
                .delete(comments::delete_comment),
        )
}
