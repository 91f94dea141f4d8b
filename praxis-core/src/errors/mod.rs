//! Error taxonomy: per-subsystem sub-errors composed into [`PraxisError`].

mod session_error;
mod storage_error;
mod sync_error;

pub use session_error::SessionError;
pub use storage_error::StorageError;
pub use sync_error::SyncError;

/// Top-level error for the Praxis engine.
#[derive(Debug, thiserror::Error)]
pub enum PraxisError {
    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    SyncError(#[from] SyncError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The operation was superseded. Dropped silently by callers,
    /// never surfaced to the user.
    #[error("operation cancelled")]
    Cancelled,
}

/// Result alias used across the workspace.
pub type PraxisResult<T> = Result<T, PraxisError>;

impl PraxisError {
    /// Whether this error is a silent cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PraxisError::Cancelled)
    }

    /// Whether this error is a recoverable network failure.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            PraxisError::SyncError(SyncError::NetworkError { .. })
        )
    }
}
