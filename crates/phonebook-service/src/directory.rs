use std::sync::{Arc, Mutex, MutexGuard};

use phonebook_store::{EntryStore, StoreError};
use phonebook_types::{normalize_field, Entry, EntryId, NewEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DirectoryError, DirectoryResult};
use crate::seed::SAMPLE_ENTRIES;

/// Input to [`DirectoryService::create`]. Fields may be absent or blank;
/// the service rejects those.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntry {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl CreateEntry {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}

/// Acknowledgement of a delete. Returned whether or not the entry existed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteAck {
    pub id: EntryId,
    /// `true` if a live entry was removed by this call.
    pub existed: bool,
}

/// Validation and business rules over an [`EntryStore`].
///
/// Mutations serialize on an internal lock for their whole duration, so the
/// duplicate-name check in [`create`](Self::create) and the insert that
/// follows it are atomic with respect to other mutations.
pub struct DirectoryService {
    store: Arc<dyn EntryStore>,
    writes: Mutex<()>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            writes: Mutex::new(()),
        }
    }

    // ---- Reads ----

    /// Every live entry, oldest first.
    pub fn list_all(&self) -> DirectoryResult<Vec<Entry>> {
        let mut entries = self.store.list()?;
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    pub fn get(&self, id: &str) -> DirectoryResult<Entry> {
        let id = EntryId::parse(id)?;
        self.store.get(&id)?.ok_or(DirectoryError::NotFound(id))
    }

    /// Number of live entries.
    pub fn count(&self) -> DirectoryResult<usize> {
        Ok(self.store.len()?)
    }

    // ---- Mutations ----

    pub fn create(&self, input: CreateEntry) -> DirectoryResult<Entry> {
        let (Some(name), Some(number)) = (
            normalize_field(input.name.as_deref()),
            normalize_field(input.number.as_deref()),
        ) else {
            return Err(DirectoryError::Validation(DirectoryError::MISSING_NAME_OR_NUMBER));
        };

        let _guard = self.lock_writes()?;
        if self.store.list()?.iter().any(|e| e.has_name(&name)) {
            warn!(%name, "rejected duplicate name");
            return Err(DirectoryError::DuplicateName { name });
        }

        let entry = self.store.insert(NewEntry { name, number })?;
        info!(id = %entry.id, name = %entry.name, "created entry");
        Ok(entry)
    }

    /// Replace the number of an existing entry. The name is left alone.
    pub fn update_number(&self, id: &str, number: Option<&str>) -> DirectoryResult<Entry> {
        let number = normalize_field(number)
            .ok_or(DirectoryError::Validation(DirectoryError::MISSING_NUMBER))?;
        let id = EntryId::parse(id)?;

        let _guard = self.lock_writes()?;
        let existing = self.store.get(&id)?.ok_or(DirectoryError::NotFound(id))?;
        let updated = self
            .store
            .replace(&id, NewEntry { name: existing.name, number })?
            .ok_or(DirectoryError::NotFound(id))?;
        info!(id = %updated.id, number = %updated.number, "updated entry");
        Ok(updated)
    }

    /// Delete an entry. Deleting an id with no live entry succeeds with the
    /// same acknowledgement shape; only a malformed id is an error.
    pub fn delete(&self, id: &str) -> DirectoryResult<DeleteAck> {
        let id = EntryId::parse(id)?;

        let _guard = self.lock_writes()?;
        let existed = self.store.remove(&id)?;
        if existed {
            info!(%id, "deleted entry");
        } else {
            debug!(%id, "delete of absent entry");
        }
        Ok(DeleteAck { id, existed })
    }

    /// Load [`SAMPLE_ENTRIES`] into an empty directory. Returns how many were
    /// created; a non-empty directory is left as is.
    pub fn seed_defaults(&self) -> DirectoryResult<usize> {
        if !self.store.is_empty()? {
            return Ok(0);
        }
        for (name, number) in SAMPLE_ENTRIES {
            self.create(CreateEntry::new(*name, *number))?;
        }
        info!(count = SAMPLE_ENTRIES.len(), "seeded sample directory");
        Ok(SAMPLE_ENTRIES.len())
    }

    fn lock_writes(&self) -> DirectoryResult<MutexGuard<'_, ()>> {
        self.writes
            .lock()
            .map_err(|_| DirectoryError::Store(StoreError::LockPoisoned))
    }
}

impl std::fmt::Debug for DirectoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryService").finish_non_exhaustive()
    }
}
