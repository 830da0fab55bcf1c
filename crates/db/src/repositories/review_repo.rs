//! Repository for the `reviews` table.

use revue_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::Review;

/// Joined select exposing the author's username alongside the review row.
const BASE_SELECT: &str = "\
    SELECT r.id, r.title_id, r.author_id, u.username AS author, \
           r.text, r.score, r.pub_date \
    FROM reviews r \
    JOIN users u ON u.id = r.author_id";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review, returning the created row with its author username.
    pub async fn create(
        pool: &PgPool,
        title_id: DbId,
        author_id: DbId,
        text: &str,
        score: i32,
    ) -> Result<Review, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO reviews (title_id, author_id, text, score)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(title_id)
        .bind(author_id)
        .bind(text)
        .bind(score)
        .fetch_one(pool)
        .await?;

        let query = format!("{BASE_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List a title's reviews in ascending publication order.
    pub async fn list_for_title(pool: &PgPool, title_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("{BASE_SELECT} WHERE r.title_id = $1 ORDER BY r.pub_date, r.id");
        sqlx::query_as::<_, Review>(&query)
            .bind(title_id)
            .fetch_all(pool)
            .await
    }

    /// Find a review by ID, scoped to the stated title. Returns `None` when
    /// the review does not exist or belongs to a different title.
    pub async fn find_for_title(
        pool: &PgPool,
        id: DbId,
        title_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("{BASE_SELECT} WHERE r.id = $1 AND r.title_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(title_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the review a given author wrote for a given title, if any.
    pub async fn find_by_author_and_title(
        pool: &PgPool,
        author_id: DbId,
        title_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("{BASE_SELECT} WHERE r.author_id = $1 AND r.title_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(author_id)
            .bind(title_id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a review's text and/or score. `pub_date` is immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        text: Option<&str>,
        score: Option<i32>,
    ) -> Result<Option<Review>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE reviews SET
                text = COALESCE($2, text),
                score = COALESCE($3, score)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(text)
        .bind(score)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => {
                let query = format!("{BASE_SELECT} WHERE r.id = $1");
                sqlx::query_as::<_, Review>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
            }
            None => Ok(None),
        }
    }

    /// Delete a review. Returns `true` if a row was removed. Comments cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
