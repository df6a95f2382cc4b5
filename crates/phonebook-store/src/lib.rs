//! Entry storage for the phonebook directory.
//!
//! The store is the single source of truth for directory entries. It assigns
//! identifiers and persists state; it does not validate field contents or
//! enforce name uniqueness (the directory service owns those rules).
//!
//! # Storage Backends
//!
//! All backends implement the [`EntryStore`] trait:
//!
//! - [`InMemoryEntryStore`] -- `HashMap`-based store for tests and ephemeral servers
//! - [`FileEntryStore`] -- in-memory map mirrored to a JSON document on disk
//!
//! # Design Rules
//!
//! 1. Ids are assigned by the store on insert and never change.
//! 2. `insert`, `replace` and `remove` are durable when they return `Ok`.
//! 3. `list` makes no ordering promise; callers sort for display only.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileEntryStore;
pub use memory::InMemoryEntryStore;
pub use traits::EntryStore;
