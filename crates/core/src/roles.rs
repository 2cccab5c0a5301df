//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20200122000005_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// Roles allowed to create, change or delete documents.
pub fn can_write_documents(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
