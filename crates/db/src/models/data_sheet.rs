//! Data sheet entity model and DTOs.

use clientele_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A data sheet row from the `data_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DataSheet {
    pub id: DbId,
    pub description: String,
    pub historical_data: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a data sheet, standalone or nested in a customer payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDataSheet {
    pub description: String,
    pub historical_data: String,
}

/// DTO for updating an existing data sheet. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDataSheet {
    pub description: Option<String>,
    pub historical_data: Option<String>,
}
