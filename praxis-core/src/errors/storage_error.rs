/// Storage-layer errors for the local tenant store.
///
/// All variants are retryable on next access; the backing medium failing
/// to open or commit is never fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("transaction commit failed: {reason}")]
    CommitFailed { reason: String },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },
}
