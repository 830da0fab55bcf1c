//! Handlers for reviews, nested under `/titles/{title_id}/reviews`.
//!
//! Reading is public. Creating requires authentication and is limited to one
//! review per (author, title) pair. Mutating an existing review is allowed
//! for its author and for moderators and admins.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::types::DbId;
use revue_core::validators::{MAX_SCORE, MIN_SCORE};
use revue_db::models::review::Review;
use revue_db::repositories::{ReviewRepo, TitleRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Body for `POST /titles/{title_id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub score: i32,
}

/// Body for `PATCH /titles/{title_id}/reviews/{review_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
    pub score: Option<i32>,
}

/// Reject scores outside the 1..=10 range.
fn validate_score(score: i32) -> AppResult<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}"
        ))));
    }
    Ok(())
}

/// 404 unless the title exists.
async fn ensure_title(state: &AppState, title_id: DbId) -> AppResult<()> {
    if !TitleRepo::exists(&state.pool, title_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Title",
            key: title_id.to_string(),
        }));
    }
    Ok(())
}

/// Fetch a review scoped to its title, or 404.
async fn find_review(state: &AppState, title_id: DbId, review_id: DbId) -> AppResult<Review> {
    ensure_title(state, title_id).await?;
    ReviewRepo::find_for_title(&state.pool, review_id, title_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            key: review_id.to_string(),
        }))
}

/// 403 unless the user is the author, a moderator, or an admin.
fn ensure_can_mutate(user: &AuthUser, author_id: DbId) -> AppResult<()> {
    if user.user_id != author_id && !user.is_moderator() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or a moderator may modify this review".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/titles/{title_id}/reviews
///
/// List a title's reviews in ascending publication order. Public.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(title_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_title(&state, title_id).await?;

    let reviews = ReviewRepo::list_for_title(&state.pool, title_id).await?;

    Ok(Json(reviews))
}

/// POST /api/v1/titles/{title_id}/reviews
///
/// Create a review. Authenticated users only; one review per title per author.
pub async fn create_review(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(title_id): Path<DbId>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_title(&state, title_id).await?;
    validate_score(input.score)?;

    if ReviewRepo::find_by_author_and_title(&state.pool, user.user_id, title_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "You have already reviewed this title".into(),
        )));
    }

    let review =
        ReviewRepo::create(&state.pool, title_id, user.user_id, &input.text, input.score).await?;

    tracing::info!(review_id = review.id, title_id, user_id = user.user_id, "Review created");

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/titles/{title_id}/reviews/{review_id}
///
/// A single review, 404 if it belongs to a different title. Public.
pub async fn get_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let review = find_review(&state, title_id, review_id).await?;

    Ok(Json(review))
}

/// PATCH /api/v1/titles/{title_id}/reviews/{review_id}
///
/// Update a review's text and/or score. Author, moderator, or admin.
pub async fn patch_review(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let review = find_review(&state, title_id, review_id).await?;
    ensure_can_mutate(&user, review.author_id)?;

    if let Some(score) = input.score {
        validate_score(score)?;
    }

    let review = ReviewRepo::update(&state.pool, review_id, input.text.as_deref(), input.score)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            key: review_id.to_string(),
        }))?;

    tracing::info!(review_id, title_id, user_id = user.user_id, "Review updated");

    Ok(Json(review))
}

/// DELETE /api/v1/titles/{title_id}/reviews/{review_id}
///
/// Delete a review and its comments. Author, moderator, or admin.
pub async fn delete_review(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let review = find_review(&state, title_id, review_id).await?;
    ensure_can_mutate(&user, review.author_id)?;

    ReviewRepo::delete(&state.pool, review_id).await?;

    tracing::info!(review_id, title_id, user_id = user.user_id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}
