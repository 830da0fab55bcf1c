//! Title entity model, DTOs, and filter parameters.

use revue_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::genre::Genre;

/// A title row with its read-time aggregate rating.
///
/// `rating` is `AVG(score)` over the title's reviews, computed by a subquery
/// in every select; it is `None` when the title has no reviews.
#[derive(Debug, Clone, FromRow)]
pub struct TitleRow {
    pub id: DbId,
    pub name: String,
    pub year: i32,
    pub description: String,
    pub category_id: Option<DbId>,
    pub rating: Option<f64>,
}

/// Wire representation of a title with embedded category and genres.
#[derive(Debug, Serialize)]
pub struct TitleDetail {
    pub id: DbId,
    pub name: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub description: String,
    pub genre: Vec<Genre>,
    pub category: Option<Category>,
}

impl TitleDetail {
    pub fn from_parts(row: TitleRow, genres: Vec<Genre>, category: Option<Category>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year: row.year,
            rating: row.rating,
            description: row.description,
            genre: genres,
            category,
        }
    }
}

/// DTO for inserting a title. Slugs are resolved to ids by the handler layer.
#[derive(Debug)]
pub struct CreateTitle {
    pub name: String,
    pub year: i32,
    pub description: String,
    pub category_id: Option<DbId>,
    pub genre_ids: Vec<DbId>,
}

/// DTO for patching a title. `genre_ids = Some(..)` replaces the full genre
/// set; `None` leaves it untouched.
#[derive(Debug, Default)]
pub struct UpdateTitle {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub genre_ids: Option<Vec<DbId>>,
}

/// Query parameters for `GET /titles` (`?genre=&category=&year=&name=`).
///
/// Genre and category match by slug; name is an exact match.
#[derive(Debug, Default, Deserialize)]
pub struct TitleFilter {
    pub genre: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub name: Option<String>,
}
