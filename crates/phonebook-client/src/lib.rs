//! Client side of the phonebook.
//!
//! Holds a cached copy of the directory and decides, per submission, whether
//! to create a new entry, reject a duplicate locally, or ask to update an
//! existing entry's number. The server's answer always wins over what the
//! cache assumed.

pub mod cache;
pub mod error;
pub mod http;
pub mod local;
pub mod notice;
pub mod reconciler;
pub mod transport;

pub use cache::ClientCache;
pub use error::{ClientError, ClientResult};
pub use http::HttpTransport;
pub use local::LocalTransport;
pub use notice::Notice;
pub use reconciler::{
    Confirmation, DeleteOutcome, PendingDelete, PendingUpdate, Reconciler, Submission,
    SubmitOutcome, UpdateOutcome,
};
pub use transport::DirectoryTransport;

pub use phonebook_types::{Entry, EntryId};
