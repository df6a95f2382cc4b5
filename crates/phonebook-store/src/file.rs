use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use phonebook_types::{Entry, EntryId, NewEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::EntryStore;

const DOCUMENT_VERSION: u32 = 1;

/// On-disk document layout.
#[derive(Serialize, Deserialize)]
struct Document {
    version: u32,
    entries: Vec<Entry>,
}

/// Entry store mirrored to a single JSON document.
///
/// Reads are served from memory. Every mutation rewrites the whole document
/// through a temp file in the same directory followed by a rename, so a crash
/// leaves either the old or the new document, never a torn one. If the write
/// fails the in-memory change is rolled back and the error is returned.
pub struct FileEntryStore {
    path: PathBuf,
    entries: RwLock<HashMap<EntryId, Entry>>,
}

impl FileEntryStore {
    /// Open the document at `path`, or start empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read(&path) {
            Ok(bytes) => Self::decode(&path, &bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = entries.len(), "opened entry document");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(path: &Path, bytes: &[u8]) -> StoreResult<HashMap<EntryId, Entry>> {
        let document: Document = serde_json::from_slice(bytes)?;
        if document.version != DOCUMENT_VERSION {
            return Err(StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("unsupported document version {}", document.version),
            });
        }

        let mut map = HashMap::with_capacity(document.entries.len());
        for entry in document.entries {
            if let Some(dup) = map.insert(entry.id, entry) {
                return Err(StoreError::Corrupt {
                    path: path.to_path_buf(),
                    reason: format!("duplicate id {}", dup.id),
                });
            }
        }
        Ok(map)
    }

    fn persist(&self, map: &HashMap<EntryId, Entry>) -> StoreResult<()> {
        let mut entries: Vec<Entry> = map.values().cloned().collect();
        entries.sort_by_key(|e| e.id);
        let bytes = serde_json::to_vec_pretty(&Document {
            version: DOCUMENT_VERSION,
            entries,
        })?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Apply `change` under the write lock and persist the result, restoring
    /// the previous state if persisting fails.
    fn mutate<R>(&self, change: impl FnOnce(&mut HashMap<EntryId, Entry>) -> R) -> StoreResult<R> {
        let mut map = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = map.clone();
        let out = change(&mut map);
        if let Err(e) = self.persist(&map) {
            *map = before;
            return Err(e);
        }
        Ok(out)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<EntryId, Entry>>> {
        self.entries.read().map_err(|_| StoreError::LockPoisoned)
    }
}

impl EntryStore for FileEntryStore {
    fn list(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn get(&self, id: &EntryId) -> StoreResult<Option<Entry>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn insert(&self, fields: NewEntry) -> StoreResult<Entry> {
        let entry = Entry::from_parts(EntryId::new(), fields);
        self.mutate(|map| {
            map.insert(entry.id, entry.clone());
        })?;
        Ok(entry)
    }

    fn replace(&self, id: &EntryId, fields: NewEntry) -> StoreResult<Option<Entry>> {
        // Skip the rewrite when there is nothing to replace.
        if self.read()?.get(id).is_none() {
            return Ok(None);
        }
        self.mutate(|map| {
            map.get_mut(id).map(|slot| {
                *slot = Entry::from_parts(*id, fields);
                slot.clone()
            })
        })
    }

    fn remove(&self, id: &EntryId) -> StoreResult<bool> {
        if self.read()?.get(id).is_none() {
            return Ok(false);
        }
        self.mutate(|map| map.remove(id).is_some())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

impl std::fmt::Debug for FileEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntryStore")
            .field("path", &self.path)
            .field("entry_count", &self.len().unwrap_or_default())
            .finish()
    }
}
