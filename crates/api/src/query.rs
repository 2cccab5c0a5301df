//! Shared query parameter types for API handlers.

use clientele_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use clientele_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` pair ready to bind.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(self.offset),
        )
    }
}

/// Query parameters accepted by the customer list and bulk-action endpoints.
///
/// `active` is deliberately a string: only `"False"` selects inactive rows.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListParams {
    pub address: Option<String>,
    pub active: Option<String>,
    pub name: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CustomerListParams {
    /// `(limit, offset)` for the list query. No limit unless one is given;
    /// an explicit limit is clamped like any other page.
    pub fn page(&self) -> (Option<i64>, i64) {
        let limit = self
            .limit
            .map(|limit| clamp_limit(Some(limit), DEFAULT_LIMIT, MAX_LIMIT));
        (limit, clamp_offset(self.offset))
    }
}

/// Query parameters for the document list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentListParams {
    /// Restrict to one customer's documents (unpaginated).
    pub customer: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
