use std::sync::Arc;

use async_trait::async_trait;
use phonebook_service::{CreateEntry, DirectoryError, DirectoryService};
use phonebook_types::{Entry, EntryId};

use crate::error::{ClientError, ClientResult};
use crate::transport::DirectoryTransport;

/// [`DirectoryTransport`] that calls a [`DirectoryService`] in-process.
///
/// Used by embedders that host the directory themselves, and by tests.
#[derive(Clone, Debug)]
pub struct LocalTransport {
    directory: Arc<DirectoryService>,
}

impl LocalTransport {
    pub fn new(directory: Arc<DirectoryService>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Arc<DirectoryService> {
        &self.directory
    }
}

impl From<DirectoryError> for ClientError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Validation(msg) => Self::Validation(msg.to_string()),
            err @ DirectoryError::DuplicateName { .. } => Self::DuplicateName(err.to_string()),
            err @ DirectoryError::MalformedId(_) => Self::MalformedId(err.to_string()),
            err @ DirectoryError::NotFound(_) => Self::NotFound(err.to_string()),
            DirectoryError::Store(_) => Self::Server {
                status: 500,
                message: "internal server error".into(),
            },
        }
    }
}

#[async_trait]
impl DirectoryTransport for LocalTransport {
    async fn list(&self) -> ClientResult<Vec<Entry>> {
        Ok(self.directory.list_all()?)
    }

    async fn create(&self, name: &str, number: &str) -> ClientResult<Entry> {
        Ok(self.directory.create(CreateEntry::new(name, number))?)
    }

    async fn update_number(&self, id: &EntryId, _name: &str, number: &str) -> ClientResult<Entry> {
        Ok(self.directory.update_number(&id.to_string(), Some(number))?)
    }

    async fn delete(&self, id: &EntryId) -> ClientResult<()> {
        self.directory.delete(&id.to_string())?;
        Ok(())
    }
}
