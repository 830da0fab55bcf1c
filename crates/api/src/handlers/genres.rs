//! Handlers for genres.
//!
//! Same surface as categories: public listing, admin-only create and delete,
//! no single-item retrieval or patching.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::validators::validate_slug;
use revue_db::repositories::GenreRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Body for `POST /genres`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50),
        custom(function = validate_slug)
    )]
    pub slug: String,
}

/// GET /api/v1/genres
///
/// List all genres, newest first. Public.
pub async fn list_genres(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let genres = GenreRepo::list(&state.pool).await?;

    Ok(Json(genres))
}

/// POST /api/v1/genres
///
/// Create a genre. Admin only. A duplicate slug yields 409.
pub async fn create_genre(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGenreRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let genre = GenreRepo::create(&state.pool, &input.name, &input.slug).await?;

    tracing::info!(slug = %genre.slug, admin_id = admin.user_id, "Genre created");

    Ok((StatusCode::CREATED, Json(genre)))
}

/// DELETE /api/v1/genres/{slug}
///
/// Delete a genre. Admin only. Title-genre links cascade.
pub async fn delete_genre(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = GenreRepo::delete_by_slug(&state.pool, &slug).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Genre",
            key: slug,
        }));
    }

    tracing::info!(slug = %slug, admin_id = admin.user_id, "Genre deleted");

    Ok(StatusCode::NO_CONTENT)
}
