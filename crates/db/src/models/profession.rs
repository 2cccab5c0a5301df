//! Profession entity model and DTOs.
//!
//! Professions are shared: many customers may link to the same row through
//! the `customer_professions` junction table.

use clientele_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A profession row from the `professions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profession {
    pub id: DbId,
    pub description: String,
    pub status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new profession.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfession {
    pub description: String,
    /// Defaults to `true` if omitted.
    pub status: Option<bool>,
}

/// DTO for updating an existing profession. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfession {
    pub description: Option<String>,
    pub status: Option<bool>,
}
