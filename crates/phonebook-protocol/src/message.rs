use serde::{Deserialize, Serialize};

/// Body of `POST /api/entries`.
///
/// Both fields are optional on the wire so that an absent field reaches the
/// directory service as a validation failure instead of a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// Body of `PUT /api/entries/:id`. `name` is accepted and ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// Machine-readable class of an [`ErrorBody`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    DuplicateName,
    MalformedId,
    NotFound,
    UnknownEndpoint,
    BadRequest,
    #[serde(other)]
    Internal,
}

/// JSON body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message, e.g. `"name already exists"`.
    pub error: String,
    #[serde(default = "ErrorBody::default_kind")]
    pub kind: ErrorKind,
}

impl ErrorBody {
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind,
        }
    }

    pub fn unknown_endpoint() -> Self {
        Self::new(ErrorKind::UnknownEndpoint, "unknown endpoint")
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal, "internal server error")
    }

    fn default_kind() -> ErrorKind {
        ErrorKind::Internal
    }
}
