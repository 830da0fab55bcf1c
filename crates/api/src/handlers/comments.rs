//! Handlers for comments, nested under
//! `/titles/{title_id}/reviews/{review_id}/comments`.
//!
//! The full nesting is enforced: a comment is only reachable through the
//! title and review it actually belongs to, otherwise the route 404s.
//! Permissions mirror reviews (author, moderator, or admin may mutate).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::types::DbId;
use revue_db::models::comment::Comment;
use revue_db::repositories::{CommentRepo, ReviewRepo, TitleRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Body for creating or patching a comment.
#[derive(Debug, Deserialize)]
pub struct CommentTextRequest {
    pub text: String,
}

/// 404 unless the review exists under the stated title.
async fn ensure_review(state: &AppState, title_id: DbId, review_id: DbId) -> AppResult<()> {
    if !TitleRepo::exists(&state.pool, title_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Title",
            key: title_id.to_string(),
        }));
    }
    if ReviewRepo::find_for_title(&state.pool, review_id, title_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            key: review_id.to_string(),
        }));
    }
    Ok(())
}

/// Fetch a comment scoped to its review (and the review to its title), or 404.
async fn find_comment(
    state: &AppState,
    title_id: DbId,
    review_id: DbId,
    comment_id: DbId,
) -> AppResult<Comment> {
    ensure_review(state, title_id, review_id).await?;
    CommentRepo::find_for_review(&state.pool, comment_id, review_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            key: comment_id.to_string(),
        }))
}

/// 403 unless the user is the author, a moderator, or an admin.
fn ensure_can_mutate(user: &AuthUser, author_id: DbId) -> AppResult<()> {
    if user.user_id != author_id && !user.is_moderator() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or a moderator may modify this comment".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/titles/{title_id}/reviews/{review_id}/comments
///
/// List a review's comments in ascending publication order. Public.
pub async fn list_comments(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_review(&state, title_id, review_id).await?;

    let comments = CommentRepo::list_for_review(&state.pool, review_id).await?;

    Ok(Json(comments))
}

/// POST /api/v1/titles/{title_id}/reviews/{review_id}/comments
///
/// Add a comment to a review. Authenticated users only.
pub async fn create_comment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(DbId, DbId)>,
    Json(input): Json<CommentTextRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_review(&state, title_id, review_id).await?;

    let comment =
        CommentRepo::create(&state.pool, review_id, title_id, user.user_id, &input.text).await?;

    tracing::info!(comment_id = comment.id, review_id, user_id = user.user_id, "Comment created");

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}
///
/// A single comment, 404 unless the full nesting matches. Public.
pub async fn get_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, title_id, review_id, comment_id).await?;

    Ok(Json(comment))
}

/// PATCH /api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}
///
/// Update a comment's text. Author, moderator, or admin.
pub async fn patch_comment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(DbId, DbId, DbId)>,
    Json(input): Json<CommentTextRequest>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, title_id, review_id, comment_id).await?;
    ensure_can_mutate(&user, comment.author_id)?;

    let comment = CommentRepo::update(&state.pool, comment_id, &input.text)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            key: comment_id.to_string(),
        }))?;

    tracing::info!(comment_id, review_id, user_id = user.user_id, "Comment updated");

    Ok(Json(comment))
}

/// DELETE /api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}
///
/// Delete a comment. Author, moderator, or admin.
pub async fn delete_comment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, title_id, review_id, comment_id).await?;
    ensure_can_mutate(&user, comment.author_id)?;

    CommentRepo::delete(&state.pool, comment_id).await?;

    tracing::info!(comment_id, review_id, user_id = user.user_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}
