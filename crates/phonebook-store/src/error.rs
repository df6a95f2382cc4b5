use std::path::PathBuf;

/// Errors from entry store operations.
///
/// Lookups of absent ids are not errors; they surface as `Ok(None)` or
/// `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted document is readable but inconsistent.
    #[error("corrupt store document {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
