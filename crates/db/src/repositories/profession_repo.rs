//! Repository for the `professions` table.

use clientele_core::types::DbId;
use sqlx::PgPool;

use crate::models::profession::{CreateProfession, Profession, UpdateProfession};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, description, status, created_at, updated_at";

/// Provides CRUD operations for professions.
pub struct ProfessionRepo;

impl ProfessionRepo {
    /// Insert a new profession, returning the created row.
    ///
    /// If `status` is `None`, defaults to `true`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProfession,
    ) -> Result<Profession, sqlx::Error> {
        let query = format!(
            "INSERT INTO professions (description, status)
             VALUES ($1, COALESCE($2, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profession>(&query)
            .bind(&input.description)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a profession by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM professions WHERE id = $1");
        sqlx::query_as::<_, Profession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List professions ordered by id ascending.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM professions ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Profession>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Return the subset of `ids` that have no matching profession row.
    ///
    /// The result preserves the order of `ids` and is empty when all exist.
    pub async fn find_missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM professions WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(pool)
                .await?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }

    /// Update a profession. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfession,
    ) -> Result<Option<Profession>, sqlx::Error> {
        let query = format!(
            "UPDATE professions SET
                description = COALESCE($2, description),
                status = COALESCE($3, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profession>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a profession. Links to customers are removed by cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM professions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
