//! Domain primitives shared by the database and API crates.
//!
//! Nothing in here performs I/O: ids, the domain error type, field
//! validation rules, role names and list-query parsing.

pub mod error;
pub mod listing;
pub mod records;
pub mod roles;
pub mod types;
