//! Genre entity model.

use revue_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A genre row. Addressed by slug; the internal id is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub name: String,
    pub slug: String,
}
