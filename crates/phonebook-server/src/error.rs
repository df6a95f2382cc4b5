use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use phonebook_protocol::{ErrorBody, ErrorKind};
use phonebook_service::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Request body could not be decoded.
    #[error("malformed request body: {0}")]
    BadRequest(String),

    #[error("store error: {0}")]
    Store(#[from] phonebook_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking directory task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Status code and wire body for this error.
    ///
    /// Unclassified failures collapse to a generic 500 body; their detail only
    /// goes to the server log.
    pub fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            Self::Directory(err) => match err {
                DirectoryError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, ErrorBody::new(ErrorKind::Validation, err.to_string()))
                }
                DirectoryError::DuplicateName { .. } => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new(ErrorKind::DuplicateName, err.to_string()),
                ),
                DirectoryError::MalformedId(_) => {
                    (StatusCode::BAD_REQUEST, ErrorBody::new(ErrorKind::MalformedId, err.to_string()))
                }
                DirectoryError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, ErrorBody::new(ErrorKind::NotFound, err.to_string()))
                }
                DirectoryError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal()),
            },
            Self::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(ErrorKind::BadRequest, "malformed request body"),
            ),
            Self::Store(_) | Self::Config(_) | Self::Io(_) | Self::Join(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}
