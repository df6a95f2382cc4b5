//! REST wire contract for the phonebook.
//!
//! Shared by the server, which produces these bodies, and the client, which
//! consumes them. All bodies are UTF-8 JSON.

pub mod endpoint;
pub mod message;

pub use endpoint::{endpoints, entry_path, HealthResponse};
pub use message::{CreateEntryRequest, ErrorBody, ErrorKind, UpdateEntryRequest};

pub use phonebook_types::Entry;
