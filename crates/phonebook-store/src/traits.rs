use phonebook_types::{Entry, EntryId, NewEntry};

use crate::error::StoreResult;

/// Authoritative collection of directory entries.
///
/// All implementations must satisfy these invariants:
/// - `insert` assigns a fresh id that no live or deleted entry has used.
/// - `replace` keeps the entry's id; only field values change.
/// - Mutations are persisted before the call returns `Ok`.
/// - `list` and `get` are pure reads.
pub trait EntryStore: Send + Sync {
    /// All live entries, in no guaranteed order.
    fn list(&self) -> StoreResult<Vec<Entry>>;

    /// Read an entry by id.
    ///
    /// Returns `Ok(None)` if no live entry has this id.
    fn get(&self, id: &EntryId) -> StoreResult<Option<Entry>>;

    /// Store a new entry and return it with its assigned id.
    fn insert(&self, fields: NewEntry) -> StoreResult<Entry>;

    /// Overwrite the fields of an existing entry.
    ///
    /// Returns `Ok(None)` if no live entry has this id.
    fn replace(&self, id: &EntryId, fields: NewEntry) -> StoreResult<Option<Entry>>;

    /// Delete an entry by id. Returns `true` if the entry existed.
    fn remove(&self, id: &EntryId) -> StoreResult<bool>;

    /// Number of live entries.
    ///
    /// Default implementation counts `list()`. Backends may override.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.list()?.len())
    }

    /// Returns `true` if the store holds no entries.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
