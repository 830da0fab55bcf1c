//! Repository for the `titles` and `title_genres` tables.
//!
//! Every select computes the aggregate rating in a subquery, so review
//! mutations are reflected immediately and no stored rating can go stale.

use revue_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::Genre;
use crate::models::title::{CreateTitle, TitleFilter, TitleRow, UpdateTitle};

/// Base select with the read-time rating aggregate.
const BASE_SELECT: &str = "\
    SELECT t.id, t.name, t.year, t.description, t.category_id, \
           (SELECT AVG(r.score)::float8 FROM reviews r WHERE r.title_id = t.id) AS rating \
    FROM titles t";

/// Provides CRUD operations for titles.
pub struct TitleRepo;

impl TitleRepo {
    /// Insert a title and its genre links in one transaction, returning the
    /// created row (rating is necessarily `None`).
    pub async fn create(pool: &PgPool, input: &CreateTitle) -> Result<TitleRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO titles (name, year, description, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.year)
        .bind(&input.description)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &input.genre_ids {
            sqlx::query("INSERT INTO title_genres (title_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let query = format!("{BASE_SELECT} WHERE t.id = $1");
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a title by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TitleRow>, sqlx::Error> {
        let query = format!("{BASE_SELECT} WHERE t.id = $1");
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a title with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM titles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// List titles in name order, applying any of the optional filters.
    ///
    /// Conditions are appended and bound in a fixed order (genre, category,
    /// year, name) so placeholders line up.
    pub async fn list(pool: &PgPool, filter: &TitleFilter) -> Result<Vec<TitleRow>, sqlx::Error> {
        let mut query = format!("{BASE_SELECT} WHERE TRUE");
        let mut n = 0;

        if filter.genre.is_some() {
            n += 1;
            query.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM title_genres tg \
                   JOIN genres g ON g.id = tg.genre_id \
                   WHERE tg.title_id = t.id AND g.slug = ${n})"
            ));
        }
        if filter.category.is_some() {
            n += 1;
            query.push_str(&format!(
                " AND t.category_id = (SELECT c.id FROM categories c WHERE c.slug = ${n})"
            ));
        }
        if filter.year.is_some() {
            n += 1;
            query.push_str(&format!(" AND t.year = ${n}"));
        }
        if filter.name.is_some() {
            n += 1;
            query.push_str(&format!(" AND t.name = ${n}"));
        }
        query.push_str(" ORDER BY t.name");

        let mut q = sqlx::query_as::<_, TitleRow>(&query);
        if let Some(genre) = &filter.genre {
            q = q.bind(genre);
        }
        if let Some(category) = &filter.category {
            q = q.bind(category);
        }
        if let Some(year) = filter.year {
            q = q.bind(year);
        }
        if let Some(name) = &filter.name {
            q = q.bind(name);
        }
        q.fetch_all(pool).await
    }

    /// Patch a title. Scalar fields use COALESCE; `genre_ids = Some(..)`
    /// replaces the full genre set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTitle,
    ) -> Result<Option<TitleRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE titles SET
                name = COALESCE($2, name),
                year = COALESCE($3, year),
                description = COALESCE($4, description),
                category_id = COALESCE($5, category_id)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.year)
        .bind(&input.description)
        .bind(input.category_id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(genre_ids) = &input.genre_ids {
            sqlx::query("DELETE FROM title_genres WHERE title_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for genre_id in genre_ids {
                sqlx::query("INSERT INTO title_genres (title_id, genre_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a title. Returns `true` if a row was removed. Reviews and
    /// comments cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The genres attached to a title, newest first.
    pub async fn genres_for(pool: &PgPool, title_id: DbId) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name, g.slug
             FROM genres g
             JOIN title_genres tg ON tg.genre_id = g.id
             WHERE tg.title_id = $1
             ORDER BY g.id DESC",
        )
        .bind(title_id)
        .fetch_all(pool)
        .await
    }
}
