use std::sync::{Mutex, MutexGuard, PoisonError};

use phonebook_types::{Entry, EntryId};

/// Client-owned copy of the directory.
///
/// Not authoritative: replaced wholesale on load and patched by id after each
/// successful mutation. Every method takes the lock for its own duration
/// only, so no caller can hold it across an `.await`.
#[derive(Debug, Default)]
pub struct ClientCache {
    entries: Mutex<Vec<Entry>>,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all cached entries in display order.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get(&self, id: &EntryId) -> Option<Entry> {
        self.lock().iter().find(|e| e.id == *id).cloned()
    }

    /// First cached entry whose name matches `name` case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<Entry> {
        self.lock().iter().find(|e| e.has_name(name)).cloned()
    }

    /// Entries whose name contains `query`, ignoring case. An empty query
    /// matches everything.
    pub fn filtered(&self, query: &str) -> Vec<Entry> {
        let query = query.trim().to_lowercase();
        self.lock()
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    pub fn replace_all(&self, entries: Vec<Entry>) {
        *self.lock() = entries;
    }

    /// Append a newly created entry, or overwrite the cached copy if one with
    /// the same id is already present.
    pub fn upsert(&self, entry: Entry) {
        let mut entries = self.lock();
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry,
            None => entries.push(entry),
        }
    }

    /// Overwrite the cached entry with the same id, keeping its position.
    /// Returns `false` if it is no longer cached.
    pub fn patch(&self, entry: Entry) -> bool {
        match self.lock().iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &EntryId) -> Option<Entry> {
        let mut entries = self.lock();
        let pos = entries.iter().position(|e| e.id == *id)?;
        Some(entries.remove(pos))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook_types::NewEntry;

    fn entry(name: &str, number: &str) -> Entry {
        Entry::from_parts(EntryId::new(), NewEntry::new(name, number))
    }

    fn sample() -> ClientCache {
        let cache = ClientCache::new();
        cache.replace_all(vec![
            entry("Arto Hellas", "040-123456"),
            entry("Ada Lovelace", "39-44-5323523"),
            entry("Dan Abramov", "12-43-234345"),
        ]);
        cache
    }

    #[test]
    fn find_by_name_ignores_case() {
        let cache = sample();
        let found = cache.find_by_name("ada lovelace").unwrap();
        assert_eq!(found.number, "39-44-5323523");
        assert!(cache.find_by_name("Ada").is_none());
    }

    #[test]
    fn filter_is_substring_and_case_insensitive() {
        let cache = sample();
        let names: Vec<_> = cache.filtered("A").into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Arto Hellas", "Ada Lovelace", "Dan Abramov"]);

        let names: Vec<_> = cache.filtered("ell").into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Arto Hellas"]);

        assert_eq!(cache.filtered("").len(), 3);
        assert!(cache.filtered("zzz").is_empty());
    }

    #[test]
    fn patch_keeps_position() {
        let cache = sample();
        let mut ada = cache.find_by_name("Ada Lovelace").unwrap();
        ada.number = "000-000".into();
        assert!(cache.patch(ada.clone()));
        assert_eq!(cache.entries()[1], ada);
    }

    #[test]
    fn patch_missing_is_noop() {
        let cache = sample();
        assert!(!cache.patch(entry("Nobody", "0")));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn upsert_appends_or_overwrites() {
        let cache = sample();
        let mary = entry("Mary Poppendieck", "39-23-6423122");
        cache.upsert(mary.clone());
        assert_eq!(cache.entries().last(), Some(&mary));

        let mut changed = mary.clone();
        changed.number = "1".into();
        cache.upsert(changed);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.get(&mary.id).unwrap().number, "1");
    }

    #[test]
    fn remove_by_id() {
        let cache = sample();
        let dan = cache.find_by_name("Dan Abramov").unwrap();
        assert_eq!(cache.remove(&dan.id), Some(dan.clone()));
        assert_eq!(cache.remove(&dan.id), None);
        assert_eq!(cache.len(), 2);
    }
}
