use async_trait::async_trait;
use phonebook_types::{Entry, EntryId};

use crate::error::ClientResult;

/// Calls the client can make against a directory.
///
/// Implementations translate whatever the far side reports into
/// [`ClientError`](crate::ClientError); the reconciler branches on those
/// variants, never on status codes or message text.
#[async_trait]
pub trait DirectoryTransport: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Entry>>;
    async fn create(&self, name: &str, number: &str) -> ClientResult<Entry>;
    async fn update_number(&self, id: &EntryId, name: &str, number: &str) -> ClientResult<Entry>;
    /// Succeeds whether or not the entry still existed.
    async fn delete(&self, id: &EntryId) -> ClientResult<()>;
}
