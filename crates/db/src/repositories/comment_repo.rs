//! Repository for the `comments` table.

use revue_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::Comment;

/// Joined select exposing the author's username alongside the comment row.
const BASE_SELECT: &str = "\
    SELECT c.id, c.review_id, c.author_id, u.username AS author, \
           c.text, c.pub_date \
    FROM comments c \
    JOIN users u ON u.id = c.author_id";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment, returning the created row with its author username.
    pub async fn create(
        pool: &PgPool,
        review_id: DbId,
        title_id: DbId,
        author_id: DbId,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO comments (review_id, title_id, author_id, text)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(review_id)
        .bind(title_id)
        .bind(author_id)
        .bind(text)
        .fetch_one(pool)
        .await?;

        let query = format!("{BASE_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List a review's comments in ascending publication order.
    pub async fn list_for_review(
        pool: &PgPool,
        review_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!("{BASE_SELECT} WHERE c.review_id = $1 ORDER BY c.pub_date, c.id");
        sqlx::query_as::<_, Comment>(&query)
            .bind(review_id)
            .fetch_all(pool)
            .await
    }

    /// Find a comment by ID, scoped to the stated review.
    pub async fn find_for_review(
        pool: &PgPool,
        id: DbId,
        review_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("{BASE_SELECT} WHERE c.id = $1 AND c.review_id = $2");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(review_id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a comment's text. `pub_date` is immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let updated: Option<DbId> =
            sqlx::query_scalar("UPDATE comments SET text = $2 WHERE id = $1 RETURNING id")
                .bind(id)
                .bind(text)
                .fetch_optional(pool)
                .await?;

        match updated {
            Some(id) => {
                let query = format!("{BASE_SELECT} WHERE c.id = $1");
                sqlx::query_as::<_, Comment>(&query)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
            }
            None => Ok(None),
        }
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
