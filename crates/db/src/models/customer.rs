//! Customer entity model, aggregate view and DTOs.
//!
//! A customer row only carries its scalar columns. The wire representation
//! is the [`CustomerDetail`] aggregate, which embeds the owned data sheet,
//! the linked professions and the string forms of the customer's documents.

use clientele_core::records::customer_status_message;
use clientele_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::data_sheet::{CreateDataSheet, DataSheet, UpdateDataSheet};
use crate::models::document::{Document, NewDocument};
use crate::models::profession::{CreateProfession, Profession};

/// A customer row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub active: bool,
    pub data_sheet_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Serialized customer aggregate returned by every customer endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub professions: Vec<Profession>,
    pub data_sheet: DataSheet,
    pub active: bool,
    pub status_message: &'static str,
    pub num_professions: usize,
    pub document_set: Vec<String>,
}

impl CustomerDetail {
    /// Combine a customer row with its related records.
    pub fn assemble(
        customer: Customer,
        data_sheet: DataSheet,
        professions: Vec<Profession>,
        documents: &[Document],
    ) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            address: customer.address,
            num_professions: professions.len(),
            professions,
            data_sheet,
            active: customer.active,
            status_message: customer_status_message(customer.active),
            document_set: documents.iter().map(ToString::to_string).collect(),
        }
    }
}

/// A profession entry in a customer create payload.
///
/// An entry carrying an `id` links an existing profession; any other entry
/// creates a new profession and links it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfessionEntry {
    Existing(ProfessionRef),
    New(CreateProfession),
}

/// Reference to an existing profession by id.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProfessionRef {
    pub id: DbId,
}

/// Nested payload for creating a customer together with its data sheet,
/// documents and professions.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub address: String,
    pub data_sheet: CreateDataSheet,
    pub professions: Vec<ProfessionEntry>,
    pub document_set: Vec<NewDocument>,
}

impl CreateCustomer {
    /// Ids of the existing professions this payload links to.
    pub fn referenced_profession_ids(&self) -> Vec<DbId> {
        self.professions
            .iter()
            .filter_map(|entry| match entry {
                ProfessionEntry::Existing(r) => Some(r.id),
                ProfessionEntry::New(_) => None,
            })
            .collect()
    }
}

/// Full-replacement payload for `PUT /customers/{id}`.
///
/// `professions` replaces every existing link.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceCustomer {
    pub name: String,
    pub address: String,
    pub data_sheet: CreateDataSheet,
    pub professions: Vec<ProfessionRef>,
}

impl ReplaceCustomer {
    pub fn profession_ids(&self) -> Vec<DbId> {
        self.professions.iter().map(|r| r.id).collect()
    }
}

/// Partial-update payload for `PATCH /customers/{id}`. Profession links are
/// never touched by a patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchCustomer {
    pub name: Option<String>,
    pub address: Option<String>,
    pub data_sheet: Option<UpdateDataSheet>,
}

/// Row-selection filter shared by the list endpoint and the bulk actions.
#[derive(Debug, Clone)]
pub struct CustomerFilter {
    /// Required value of the `active` flag.
    pub active: bool,
    /// Case-insensitive substring of `address`.
    pub address: Option<String>,
    /// Exact `name`.
    pub name: Option<String>,
    /// Free-text search terms. Every term must match a `name` prefix or a
    /// substring of `address` or of the data sheet description, all
    /// case-insensitive. Empty matches everything.
    pub search: Vec<String>,
}

impl Default for CustomerFilter {
    fn default() -> Self {
        Self {
            active: true,
            address: None,
            name: None,
            search: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;
    use crate::models::document::DocType;

    #[test]
    fn profession_entry_with_id_links_existing() {
        let entry: ProfessionEntry = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_matches!(entry, ProfessionEntry::Existing(ProfessionRef { id: 4 }));
    }

    #[test]
    fn profession_entry_without_id_creates_new() {
        let entry: ProfessionEntry =
            serde_json::from_str(r#"{"description": "Engineer"}"#).unwrap();
        assert_matches!(
            entry,
            ProfessionEntry::New(CreateProfession { ref description, status: None })
                if description == "Engineer"
        );
    }

    #[test]
    fn create_payload_requires_nested_keys() {
        let missing_sheet = r#"{"name":"A","address":"B","professions":[],"document_set":[]}"#;
        assert!(serde_json::from_str::<CreateCustomer>(missing_sheet).is_err());
    }

    #[test]
    fn referenced_ids_skip_new_entries() {
        let payload: CreateCustomer = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "address": "1 Main St",
            "data_sheet": {"description": "d", "historical_data": "h"},
            "professions": [{"id": 9}, {"description": "Engineer"}, {"id": 2}],
            "document_set": [],
        }))
        .unwrap();
        assert_eq!(payload.referenced_profession_ids(), vec![9, 2]);
    }

    #[test]
    fn assemble_derives_counts_and_strings() {
        let now = Utc::now();
        let customer = Customer {
            id: 1,
            name: "Alice".into(),
            address: "1 Main St".into(),
            active: false,
            data_sheet_id: 7,
            created_at: now,
            updated_at: now,
        };
        let sheet = DataSheet {
            id: 7,
            description: "d".into(),
            historical_data: "h".into(),
            created_at: now,
            updated_at: now,
        };
        let profession = Profession {
            id: 3,
            description: "Engineer".into(),
            status: true,
            created_at: now,
            updated_at: now,
        };
        let document = Document {
            id: 5,
            doc_type: DocType::Passport,
            doc_number: "X1".into(),
            customer_id: 1,
            created_at: now,
            updated_at: now,
        };

        let detail = CustomerDetail::assemble(customer, sheet, vec![profession], &[document]);

        assert_eq!(detail.num_professions, 1);
        assert_eq!(detail.document_set, vec!["X1".to_string()]);
        assert_eq!(detail.status_message, "Customer not active");
        assert_eq!(detail.data_sheet.id, 7);
    }
}
