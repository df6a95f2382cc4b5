//! Directory service for the phonebook.
//!
//! Sits between the transport and the entry store. It validates input, owns
//! the case-insensitive name-uniqueness rule, and resolves every failure into
//! [`DirectoryError`] before it reaches a caller.

pub mod directory;
pub mod error;
pub mod seed;

pub use directory::{CreateEntry, DeleteAck, DirectoryService};
pub use error::{DirectoryError, DirectoryResult};
pub use seed::SAMPLE_ENTRIES;

pub use phonebook_types::{Entry, EntryId, NewEntry};
