//! HTTP server for the phonebook.
//!
//! A thin transport over [`DirectoryService`](phonebook_service::DirectoryService):
//! handlers parse paths and bodies, call the service, and map results and
//! errors to status codes and JSON bodies. No business rules live here.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::PhonebookServer;
