use std::time::Duration;

use super::store::Revision;

/// Failures reported by a content store client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("revision conflict: expected {expected}, found {actual}")]
    Conflict { expected: Revision, actual: Revision },

    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Sync failures, surfaced to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("{document_type}.{field_name} is not a registered sync target")]
    UnsupportedTarget {
        document_type: String,
        field_name: String,
    },

    #[error("invalid sync request: {0}")]
    InvalidRequest(String),

    #[error("revision conflict: expected {expected}, remote is at {actual}")]
    RevisionConflict { expected: Revision, actual: Revision },

    #[error("a sync for this target is already in flight")]
    SyncInProgress,

    #[error("content store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("sync timed out after {0:?}")]
    Timeout(Duration),

    #[error("document {0} not found")]
    DocumentNotFound(String),

    #[error("failed to encode blocks: {0}")]
    Encode(String),
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => SyncError::DocumentNotFound(id),
            StoreError::Conflict { expected, actual } => {
                SyncError::RevisionConflict { expected, actual }
            }
            StoreError::Unavailable(msg) => SyncError::RemoteUnavailable(msg),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode audit record: {0}")]
    Encode(#[from] serde_json::Error),
}
