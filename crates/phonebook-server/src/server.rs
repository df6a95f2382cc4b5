use std::sync::Arc;

use phonebook_service::DirectoryService;
use phonebook_store::{EntryStore, FileEntryStore, InMemoryEntryStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// Phonebook REST server.
pub struct PhonebookServer {
    config: ServerConfig,
    directory: Arc<DirectoryService>,
}

impl PhonebookServer {
    /// Open the configured store and, if asked, seed it.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn EntryStore> = match &config.data_path {
            Some(path) => Arc::new(FileEntryStore::open(path)?),
            None => Arc::new(InMemoryEntryStore::new()),
        };
        let directory = Arc::new(DirectoryService::new(store));
        if config.seed {
            directory.seed_defaults()?;
        }
        Ok(Self { config, directory })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn directory(&self) -> &Arc<DirectoryService> {
        &self.directory
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let router = build_router(AppState::new(Arc::clone(&self.directory)));
        if self.config.cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener until Ctrl-C.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        let app = self.router();
        tracing::info!("phonebook server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Io)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
