use phonebook_store::StoreError;
use phonebook_types::{EntryId, TypeError};
use thiserror::Error;

/// Everything a directory operation can fail with.
///
/// The `Display` strings of the client-facing variants are the messages sent
/// over the wire.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A required field is missing or blank.
    #[error("{0}")]
    Validation(&'static str),

    /// Another live entry already has this name (case-insensitive).
    #[error("name already exists")]
    DuplicateName { name: String },

    /// The id is not in the store's identifier syntax.
    #[error("malformatted id")]
    MalformedId(String),

    /// Well-formed id with no live entry.
    #[error("entry not found")]
    NotFound(EntryId),

    /// Unclassified store failure. Never shown to clients verbatim.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl DirectoryError {
    pub const MISSING_NAME_OR_NUMBER: &'static str = "name or number is missing";
    pub const MISSING_NUMBER: &'static str = "number is missing";
}

impl From<TypeError> for DirectoryError {
    fn from(e: TypeError) -> Self {
        match e {
            TypeError::MalformedId(raw) => Self::MalformedId(raw),
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
