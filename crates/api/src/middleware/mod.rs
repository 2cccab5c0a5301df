//! Authentication and permission extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role (professions).
//! - [`rbac::RequireDocumentWriter`] -- Requires `admin` or `editor` (document writes).

pub mod auth;
pub mod rbac;
