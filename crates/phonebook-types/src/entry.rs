use serde::{Deserialize, Serialize};

use crate::id::EntryId;

/// One directory record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned, immutable.
    pub id: EntryId,
    /// Matching key for duplicate detection (case-insensitive).
    pub name: String,
    pub number: String,
}

impl Entry {
    /// Assemble a stored entry from its id and field values.
    pub fn from_parts(id: EntryId, fields: NewEntry) -> Self {
        Self {
            id,
            name: fields.name,
            number: fields.number,
        }
    }

    /// Whether this entry's name equals `name` ignoring case and surrounding
    /// whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// The field values of an entry, without an id.
///
/// Handed to the store on `insert` (which assigns the id) and `replace`
/// (which keeps the existing one).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub name: String,
    pub number: String,
}

impl NewEntry {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Trim a submitted field, returning `None` when nothing is left.
pub fn normalize_field(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-insensitive name comparison used for duplicate detection on both the
/// server and the client.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
