pub mod auth;
pub mod customer;
pub mod data_sheet;
pub mod document;
pub mod profession;
