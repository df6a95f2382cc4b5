use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use phonebook_types::{Entry, EntryId, NewEntry};

use crate::error::{StoreError, StoreResult};
use crate::traits::EntryStore;

/// In-memory, HashMap-based entry store.
///
/// Intended for tests and ephemeral servers. Entries are held behind a
/// `RwLock` and cloned on read. Data is lost when the store is dropped.
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<EntryId, Entry>>,
}

impl InMemoryEntryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with `entries`, keeping their ids.
    pub fn with_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().map(|e| (e.id, e)).collect()),
        }
    }

    /// Remove all entries from the store.
    pub fn clear(&self) -> StoreResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<EntryId, Entry>>> {
        self.entries.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<EntryId, Entry>>> {
        self.entries.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for InMemoryEntryStore {
    fn list(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn get(&self, id: &EntryId) -> StoreResult<Option<Entry>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn insert(&self, fields: NewEntry) -> StoreResult<Entry> {
        let entry = Entry::from_parts(EntryId::new(), fields);
        self.write()?.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn replace(&self, id: &EntryId, fields: NewEntry) -> StoreResult<Option<Entry>> {
        let mut map = self.write()?;
        let updated = map.get_mut(id).map(|slot| {
            *slot = Entry::from_parts(*id, fields);
            slot.clone()
        });
        Ok(updated)
    }

    fn remove(&self, id: &EntryId) -> StoreResult<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

impl std::fmt::Debug for InMemoryEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryEntryStore")
            .field("entry_count", &count)
            .finish()
    }
}
