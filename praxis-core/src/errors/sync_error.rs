/// Remote reconciliation errors.
///
/// A remote "row already exists" conflict is NOT an error: the gateway
/// reports it in the upsert ack and the reconciler treats it as success.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The remote call failed. Recoverable: retried on the next
    /// connectivity event, never blocks local completion.
    #[error("network error: {reason}")]
    NetworkError { reason: String },

    /// The remote answered but refused the request.
    #[error("remote rejected the request: {reason}")]
    RemoteRejected { reason: String },
}
