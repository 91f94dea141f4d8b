//! Connection handling: a single mutex-guarded writer per tenant database.
//!
//! The engine's concurrency model is a single logical thread per device, so
//! one write connection suffices; reads go through the same connection and
//! therefore always see the latest local write.

pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use praxis_core::errors::{PraxisResult, StorageError};

/// The single write connection for one tenant database.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open (creating if needed) the database file and apply pragmas.
    pub fn open(path: &Path) -> PraxisResult<Self> {
        let conn = Connection::open(path).map_err(|e| StorageError::Unavailable {
            reason: format!("open {}: {e}", path.display()),
        })?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> PraxisResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Unavailable {
            reason: format!("open in-memory: {e}"),
        })?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> PraxisResult<T>
    where
        F: FnOnce(&Connection) -> PraxisResult<T>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::Unavailable {
            reason: "writer mutex poisoned".to_string(),
        })?;
        f(&guard)
    }
}
