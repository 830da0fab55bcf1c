//! Handlers for titles.
//!
//! Titles reference categories and genres by slug on the wire; the handler
//! layer resolves slugs to internal ids before touching the repository. The
//! `rating` field in responses is the average review score, computed at read
//! time, or `null` when the title has no reviews.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use revue_core::error::CoreError;
use revue_core::types::DbId;
use revue_core::validators::validate_year;
use revue_db::models::title::{CreateTitle, TitleDetail, TitleFilter, TitleRow, UpdateTitle};
use revue_db::repositories::{CategoryRepo, GenreRepo, TitleRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body for `POST /titles`. Category and genres are given as slugs.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTitleRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

/// Body for `PATCH /titles/{id}`. `genre = Some(..)` replaces the full set.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTitleRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Slug resolution
// ---------------------------------------------------------------------------

/// Resolve a category slug to its id. Unknown slugs are a client error.
async fn resolve_category(state: &AppState, slug: &str) -> AppResult<DbId> {
    let category = CategoryRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown category slug '{slug}'")))?;
    Ok(category.id)
}

/// Resolve genre slugs to ids, rejecting the request if any slug is unknown.
/// Repeated slugs collapse to a single genre link.
async fn resolve_genres(state: &AppState, slugs: &[String]) -> AppResult<Vec<DbId>> {
    let mut unique: Vec<String> = Vec::with_capacity(slugs.len());
    for slug in slugs {
        if !unique.contains(slug) {
            unique.push(slug.clone());
        }
    }
    if unique.is_empty() {
        return Ok(Vec::new());
    }
    let genres = GenreRepo::find_by_slugs(&state.pool, &unique).await?;
    if genres.len() != unique.len() {
        let known: Vec<&str> = genres.iter().map(|g| g.slug.as_str()).collect();
        let missing: Vec<&str> = unique
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !known.contains(s))
            .collect();
        return Err(AppError::BadRequest(format!(
            "Unknown genre slug(s): {}",
            missing.join(", ")
        )));
    }
    Ok(genres.into_iter().map(|g| g.id).collect())
}

/// Assemble the wire representation for a title row.
async fn build_detail(state: &AppState, row: TitleRow) -> AppResult<TitleDetail> {
    let genres = TitleRepo::genres_for(&state.pool, row.id).await?;
    let category = match row.category_id {
        Some(id) => CategoryRepo::find_by_id(&state.pool, id).await?,
        None => None,
    };
    Ok(TitleDetail::from_parts(row, genres, category))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/titles
///
/// List titles in name order. Supports `?genre=`, `?category=` (slugs),
/// `?year=`, and `?name=` (exact match) filters. Public.
pub async fn list_titles(
    State(state): State<AppState>,
    Query(filter): Query<TitleFilter>,
) -> AppResult<impl IntoResponse> {
    let rows = TitleRepo::list(&state.pool, &filter).await?;

    let mut titles = Vec::with_capacity(rows.len());
    for row in rows {
        titles.push(build_detail(&state, row).await?);
    }

    Ok(Json(titles))
}

/// GET /api/v1/titles/{id}
///
/// A single title with its category, genres, and rating. Public.
pub async fn get_title(
    State(state): State<AppState>,
    Path(title_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = TitleRepo::find_by_id(&state.pool, title_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Title",
            key: title_id.to_string(),
        }))?;

    Ok(Json(build_detail(&state, row).await?))
}

/// POST /api/v1/titles
///
/// Create a title. Admin only. The year must not lie in the future.
pub async fn create_title(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTitleRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_year(input.year).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let category_id = match &input.category {
        Some(slug) => Some(resolve_category(&state, slug).await?),
        None => None,
    };
    let genre_ids = resolve_genres(&state, &input.genre).await?;

    let row = TitleRepo::create(
        &state.pool,
        &CreateTitle {
            name: input.name,
            year: input.year,
            description: input.description,
            category_id,
            genre_ids,
        },
    )
    .await?;

    tracing::info!(title_id = row.id, admin_id = admin.user_id, "Title created");

    let detail = build_detail(&state, row).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PATCH /api/v1/titles/{id}
///
/// Partially update a title. Admin only.
pub async fn patch_title(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(title_id): Path<DbId>,
    Json(input): Json<UpdateTitleRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(year) = input.year {
        validate_year(year).map_err(|e| AppError::BadRequest(e.to_string()))?;
    }

    let category_id = match &input.category {
        Some(slug) => Some(resolve_category(&state, slug).await?),
        None => None,
    };
    let genre_ids = match &input.genre {
        Some(slugs) => Some(resolve_genres(&state, slugs).await?),
        None => None,
    };

    let row = TitleRepo::update(
        &state.pool,
        title_id,
        &UpdateTitle {
            name: input.name,
            year: input.year,
            description: input.description,
            category_id,
            genre_ids,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Title",
        key: title_id.to_string(),
    }))?;

    tracing::info!(title_id, admin_id = admin.user_id, "Title updated");

    Ok(Json(build_detail(&state, row).await?))
}

/// DELETE /api/v1/titles/{id}
///
/// Delete a title and, by cascade, its reviews and comments. Admin only.
pub async fn delete_title(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(title_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TitleRepo::delete(&state.pool, title_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Title",
            key: title_id.to_string(),
        }));
    }

    tracing::info!(title_id, admin_id = admin.user_id, "Title deleted");

    Ok(StatusCode::NO_CONTENT)
}
