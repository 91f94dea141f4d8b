//! # praxis-store
//!
//! SQLite-backed local tenant store. One database file per tenant, a
//! single mutex-guarded writer, WAL mode, explicit transactions for
//! batches. Implements [`praxis_core::ITenantStorage`].

pub mod engine;
pub mod manager;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::TenantStore;
pub use manager::TenantManager;

use praxis_core::errors::{PraxisError, StorageError};

/// Map a low-level SQLite failure into the storage error taxonomy.
pub fn to_storage_err(message: impl Into<String>) -> PraxisError {
    StorageError::Sqlite {
        message: message.into(),
    }
    .into()
}
