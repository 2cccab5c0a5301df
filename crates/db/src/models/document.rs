//! Document entity model and DTOs.

use std::fmt;

use clientele_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity document kind, stored as the PostgreSQL enum `document_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_type")]
pub enum DocType {
    #[serde(rename = "PP")]
    #[sqlx(rename = "PP")]
    Passport,
    #[serde(rename = "ID")]
    #[sqlx(rename = "ID")]
    IdentityCard,
    #[serde(rename = "OT")]
    #[sqlx(rename = "OT")]
    Others,
}

/// A document row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub doc_type: DocType,
    pub doc_number: String,
    /// Owning customer. Exposed as `customer` and read-only after creation.
    #[serde(rename = "customer")]
    pub customer_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The string form used in a customer's `document_set`.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.doc_number)
    }
}

/// DTO for creating a document through the `/documents` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub doc_type: DocType,
    pub doc_number: String,
    /// Id of the owning customer.
    pub customer: DbId,
}

/// A document nested in a customer create payload; the owner is implied.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    pub doc_type: DocType,
    pub doc_number: String,
}

/// DTO for updating an existing document. The owner cannot be changed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocument {
    pub doc_type: Option<DocType>,
    pub doc_number: Option<String>,
}
