//! Handlers for categories.
//!
//! Listing is public; create and delete require admin privileges. There is
//! no single-category retrieval or patching.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::validators::validate_slug;
use revue_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Body for `POST /categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50),
        custom(function = validate_slug)
    )]
    pub slug: String,
}

/// GET /api/v1/categories
///
/// List all categories, newest first. Public.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;

    Ok(Json(categories))
}

/// POST /api/v1/categories
///
/// Create a category. Admin only. A duplicate slug yields 409.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let category = CategoryRepo::create(&state.pool, &input.name, &input.slug).await?;

    tracing::info!(slug = %category.slug, admin_id = admin.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/v1/categories/{slug}
///
/// Delete a category. Admin only. Titles keep their rows with no category.
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete_by_slug(&state.pool, &slug).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            key: slug,
        }));
    }

    tracing::info!(slug = %slug, admin_id = admin.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
