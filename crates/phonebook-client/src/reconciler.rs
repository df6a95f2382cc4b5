use phonebook_types::{Entry, EntryId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::ClientCache;
use crate::error::{ClientError, ClientResult};
use crate::notice::Notice;
use crate::transport::DirectoryTransport;

/// What the user typed into the add form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub number: String,
}

impl Submission {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// The user's answer to a confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(yes: bool) -> Self {
        if yes {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// A submission waiting for the user to confirm replacing a number.
///
/// Only the reconciler creates these; pass it back to
/// [`Reconciler::resolve_update`] once the user has answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpdate {
    existing: Entry,
    number: String,
}

impl PendingUpdate {
    /// The cached entry the submission matched.
    pub fn existing(&self) -> &Entry {
        &self.existing
    }

    pub fn new_number(&self) -> &str {
        &self.number
    }

    pub fn prompt(&self) -> Notice {
        Notice::ConfirmReplace(self.existing.name.clone())
    }
}

/// A delete waiting for the user to confirm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    entry: Entry,
}

impl PendingDelete {
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn prompt(&self) -> Notice {
        Notice::ConfirmDelete(self.entry.name.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No cached match; the server created the entry and the cache has it.
    Created(Entry),
    /// Same name and number already cached. No call was made.
    AlreadyPresent(Entry),
    /// The cache had no match but the server did. Cache unchanged.
    Conflict { name: String },
    /// Same name, different number: ask the user before updating.
    ConfirmUpdate(PendingUpdate),
}

impl SubmitOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Created(e) => Notice::Added(e.name.clone()),
            Self::AlreadyPresent(e) => Notice::AlreadyPresent(e.name.clone()),
            Self::Conflict { name } => Notice::AddedElsewhere(name.clone()),
            Self::ConfirmUpdate(pending) => pending.prompt(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Entry),
    Declined,
    /// The entry was gone on the server; it has been dropped from the cache.
    AlreadyDeleted(Entry),
}

impl UpdateOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Updated(e) => Some(Notice::Updated(e.name.clone())),
            Self::Declined => None,
            Self::AlreadyDeleted(e) => Some(Notice::AlreadyRemoved(e.name.clone())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Entry),
    Declined,
}

impl DeleteOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Deleted(e) => Some(Notice::Deleted(e.name.clone())),
            Self::Declined => None,
        }
    }
}

/// Client-side reconciler over a [`DirectoryTransport`].
///
/// All methods take `&self`, so independent operations may be in flight at
/// once. Each one touches the cache only after its own call completes, and
/// only for its own target id or created entry.
pub struct Reconciler<T> {
    transport: T,
    cache: ClientCache,
}

impl<T: DirectoryTransport> Reconciler<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: ClientCache::new(),
        }
    }

    pub fn cache(&self) -> &ClientCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the cache with the server's current list. Returns its size.
    pub async fn load(&self) -> ClientResult<usize> {
        let entries = self.transport.list().await?;
        let count = entries.len();
        self.cache.replace_all(entries);
        debug!(count, "loaded directory");
        Ok(count)
    }

    /// Decide what a submission means against the cache, and act on it.
    ///
    /// Errors other than a duplicate-name rejection are returned as-is and
    /// leave the cache unchanged.
    pub async fn submit(&self, submission: Submission) -> ClientResult<SubmitOutcome> {
        let Submission { name, number } = submission;

        if let Some(existing) = self.cache.find_by_name(&name) {
            if existing.number.trim() == number.trim() {
                debug!(name = %existing.name, "submission already present");
                return Ok(SubmitOutcome::AlreadyPresent(existing));
            }
            return Ok(SubmitOutcome::ConfirmUpdate(PendingUpdate { existing, number }));
        }

        match self.transport.create(&name, &number).await {
            Ok(entry) => {
                info!(id = %entry.id, name = %entry.name, "added entry");
                self.cache.upsert(entry.clone());
                Ok(SubmitOutcome::Created(entry))
            }
            Err(ClientError::DuplicateName(_)) => {
                debug!(%name, "server already has name");
                Ok(SubmitOutcome::Conflict { name })
            }
            Err(e) => Err(e),
        }
    }

    /// Finish a [`SubmitOutcome::ConfirmUpdate`].
    pub async fn resolve_update(
        &self,
        pending: PendingUpdate,
        answer: Confirmation,
    ) -> ClientResult<UpdateOutcome> {
        if answer == Confirmation::Declined {
            return Ok(UpdateOutcome::Declined);
        }

        let PendingUpdate { existing, number } = pending;
        match self
            .transport
            .update_number(&existing.id, &existing.name, &number)
            .await
        {
            Ok(entry) => {
                info!(id = %entry.id, number = %entry.number, "updated entry");
                self.cache.patch(entry.clone());
                Ok(UpdateOutcome::Updated(entry))
            }
            Err(ClientError::NotFound(_)) => {
                self.cache.remove(&existing.id);
                Ok(UpdateOutcome::AlreadyDeleted(existing))
            }
            Err(e) => Err(e),
        }
    }

    /// Start deleting a cached entry. `None` if the id is not cached.
    pub fn request_delete(&self, id: &EntryId) -> Option<PendingDelete> {
        self.cache.get(id).map(|entry| PendingDelete { entry })
    }

    /// Finish a delete. A confirmed delete drops the entry from the cache
    /// whether or not the server still had it.
    pub async fn resolve_delete(
        &self,
        pending: PendingDelete,
        answer: Confirmation,
    ) -> ClientResult<DeleteOutcome> {
        if answer == Confirmation::Declined {
            return Ok(DeleteOutcome::Declined);
        }

        let PendingDelete { entry } = pending;
        match self.transport.delete(&entry.id).await {
            Ok(()) | Err(ClientError::NotFound(_)) => {
                self.cache.remove(&entry.id);
                info!(id = %entry.id, "deleted entry");
                Ok(DeleteOutcome::Deleted(entry))
            }
            Err(e) => Err(e),
        }
    }
}

impl<T> std::fmt::Debug for Reconciler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
