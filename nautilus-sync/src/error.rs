//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The two copies passed to the resolver are not the same record.
    #[error("record id mismatch: local {local} vs remote {remote}")]
    IdMismatch { local: String, remote: String },

    /// The next version would not fit in a `u64`.
    #[error("version overflow: cannot bump past {version}")]
    VersionOverflow { version: u64 },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),
}
