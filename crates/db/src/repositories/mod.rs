//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod customer_repo;
pub mod data_sheet_repo;
pub mod document_repo;
pub mod profession_repo;
pub mod user_repo;

pub use customer_repo::CustomerRepo;
pub use data_sheet_repo::DataSheetRepo;
pub use document_repo::DocumentRepo;
pub use profession_repo::ProfessionRepo;
pub use user_repo::UserRepo;
