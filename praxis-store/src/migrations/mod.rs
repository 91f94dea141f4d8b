//! Schema migrations, run in order on every open.

mod v001_initial;

use rusqlite::Connection;

use praxis_core::errors::{PraxisResult, StorageError};

use crate::to_storage_err;

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Run all outstanding migrations, tracked via `PRAGMA user_version`.
pub fn run_migrations(conn: &Connection) -> PraxisResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    if current < 1 {
        v001_initial::migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version: 1,
            reason: e.to_string(),
        })?;
    }

    if current < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(from = current, to = SCHEMA_VERSION, "store: migrated schema");
    }
    Ok(())
}
