use serde::{Deserialize, Serialize};

use super::defaults;

/// Reconciler and gateway transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Remote gateway base URL.
    pub endpoint: String,
    /// Per-request timeout (seconds).
    pub request_timeout_secs: u64,
    /// Maximum results pushed in one upsert batch.
    pub push_batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            push_batch_size: defaults::DEFAULT_PUSH_BATCH_SIZE,
        }
    }
}
