//! Category entity model.

use revue_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A category row. The API addresses categories by slug, so the internal id
/// is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub name: String,
    pub slug: String,
}
