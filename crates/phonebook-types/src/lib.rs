//! Foundation types for the phonebook directory.
//!
//! Every other phonebook crate depends on `phonebook-types`.
//!
//! # Key Types
//!
//! - [`EntryId`] -- store-assigned identifier (UUID v7, never reused)
//! - [`Entry`] -- one directory record
//! - [`NewEntry`] -- the partial record handed to the store on insert/replace

pub mod entry;
pub mod error;
pub mod id;

pub use entry::{names_match, normalize_field, Entry, NewEntry};
pub use error::TypeError;
pub use id::EntryId;
