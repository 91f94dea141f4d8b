//! Default values shared by the config structs.

/// Directory holding the per-tenant SQLite files.
pub const DEFAULT_DATA_DIR: &str = "./praxis-data";

/// Remote gateway base URL.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Per-request timeout for gateway calls (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum results per upsert batch.
pub const DEFAULT_PUSH_BATCH_SIZE: usize = crate::constants::MAX_PUSH_BATCH_SIZE;

/// Interval between expiry checks while an attempt is in progress (seconds).
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 5;
