use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A required field was missing; the message names it.
    #[error("{0}")]
    Validation(String),

    /// The server already has an entry with this name.
    #[error("{0}")]
    DuplicateName(String),

    /// The server could not parse an id the client sent.
    #[error("malformatted id: {0}")]
    MalformedId(String),

    /// The entry is gone on the server.
    #[error("entry not found: {0}")]
    NotFound(String),

    /// Any other non-success answer.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
