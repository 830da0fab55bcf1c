//! Review entity model.

use revue_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A review row joined with its author's username.
///
/// `author_id` is kept for object-level permission checks but the wire
/// representation exposes the author by username only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub title_id: DbId,
    #[serde(skip_serializing)]
    pub author_id: DbId,
    pub author: String,
    pub text: String,
    pub score: i32,
    pub pub_date: Timestamp,
}
