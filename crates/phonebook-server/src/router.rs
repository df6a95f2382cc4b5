use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use phonebook_protocol::endpoints;
use phonebook_service::DirectoryService;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub directory: Arc<DirectoryService>,
}

impl AppState {
    pub fn new(directory: Arc<DirectoryService>) -> Self {
        Self { directory }
    }
}

/// Build the axum router with all phonebook endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::ENTRIES,
            get(handler::list_entries).post(handler::create_entry),
        )
        .route(
            endpoints::ENTRY,
            get(handler::get_entry)
                .put(handler::update_entry)
                .delete(handler::delete_entry),
        )
        .route(endpoints::INFO, get(handler::info_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .fallback(handler::unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
