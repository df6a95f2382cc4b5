use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use phonebook_protocol::{CreateEntryRequest, ErrorBody, HealthResponse, UpdateEntryRequest};
use phonebook_service::{CreateEntry, DirectoryResult, DirectoryService, Entry};
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// `GET /api/entries`
pub async fn list_entries(State(state): State<AppState>) -> ServerResult<Json<Vec<Entry>>> {
    Ok(Json(state.directory.list_all()?))
}

/// `GET /api/entries/:id`
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Entry>> {
    Ok(Json(state.directory.get(&id)?))
}

/// `POST /api/entries`
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> ServerResult<Json<Entry>> {
    let Json(body) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    debug!(payload = ?body, "create entry");
    let request = CreateEntry {
        name: body.name,
        number: body.number,
    };
    let entry = blocking(&state, move |directory| directory.create(request)).await?;
    Ok(Json(entry))
}

/// `PUT /api/entries/:id`
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> ServerResult<Json<Entry>> {
    let Json(body) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    debug!(%id, payload = ?body, "update entry");
    let entry = blocking(&state, move |directory| {
        directory.update_number(&id, body.number.as_deref())
    })
    .await?;
    Ok(Json(entry))
}

/// `DELETE /api/entries/:id` answers 204 whether or not the entry existed.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    blocking(&state, move |directory| directory.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Run a mutating directory call on the blocking pool. The write lock and a
/// file store's fsync both live inside `op`.
async fn blocking<T, F>(state: &AppState, op: F) -> ServerResult<T>
where
    T: Send + 'static,
    F: FnOnce(&DirectoryService) -> DirectoryResult<T> + Send + 'static,
{
    let directory = Arc::clone(&state.directory);
    Ok(tokio::task::spawn_blocking(move || op(&directory)).await??)
}

/// `GET /info`
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let count = state.directory.count()?;
    let now = chrono::Local::now().to_rfc2822();
    Ok(Html(format!(
        "<p>Phonebook has info for {count} people</p> <p>{now}</p>"
    )))
}

/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Fallback for every unmatched route.
pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::unknown_endpoint()))
}
