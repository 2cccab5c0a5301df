//! Repository for the `data_sheets` table.

use clientele_core::types::DbId;
use sqlx::PgPool;

use crate::models::data_sheet::{CreateDataSheet, DataSheet, UpdateDataSheet};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, description, historical_data, created_at, updated_at";

/// Provides CRUD operations for data sheets.
pub struct DataSheetRepo;

impl DataSheetRepo {
    /// Insert a new data sheet, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDataSheet) -> Result<DataSheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO data_sheets (description, historical_data)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DataSheet>(&query)
            .bind(&input.description)
            .bind(&input.historical_data)
            .fetch_one(pool)
            .await
    }

    /// Find a data sheet by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DataSheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM data_sheets WHERE id = $1");
        sqlx::query_as::<_, DataSheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List data sheets, oldest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<DataSheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM data_sheets ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, DataSheet>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a data sheet. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDataSheet,
    ) -> Result<Option<DataSheet>, sqlx::Error> {
        let query = format!(
            "UPDATE data_sheets SET
                description = COALESCE($2, description),
                historical_data = COALESCE($3, historical_data)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DataSheet>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(&input.historical_data)
            .fetch_optional(pool)
            .await
    }

    /// Delete a data sheet. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while a customer still owns it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM data_sheets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
