//! TenantStore — owns the write connection, runs migrations on open,
//! implements the full ITenantStorage contract.

use std::path::Path;

use serde_json::Value;

use praxis_core::errors::PraxisResult;
use praxis_core::models::ExamResult;
use praxis_core::traits::{Collection, ITenantStorage};

use crate::migrations;
use crate::pool::WriteConnection;
use crate::queries::{collection_ops, kv_ops, maintenance, result_ops};

/// One tenant's durable store.
pub struct TenantStore {
    writer: WriteConnection,
}

impl TenantStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> PraxisResult<Self> {
        let writer = WriteConnection::open(path)?;
        let store = Self { writer };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> PraxisResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let store = Self { writer };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> PraxisResult<()> {
        self.writer.with_conn(migrations::run_migrations)
    }

    /// Delete every row in every table (logout/reset path).
    pub fn wipe(&self) -> PraxisResult<()> {
        self.writer.with_conn(maintenance::wipe_all)
    }
}

impl ITenantStorage for TenantStore {
    fn get(&self, collection: Collection, key: &str) -> PraxisResult<Option<Value>> {
        self.writer
            .with_conn(|conn| collection_ops::get(conn, collection, key))
    }

    fn put(&self, collection: Collection, key: &str, value: &Value) -> PraxisResult<()> {
        self.writer
            .with_conn(|conn| collection_ops::put(conn, collection, key, value))
    }

    fn delete(&self, collection: Collection, key: &str) -> PraxisResult<()> {
        self.writer
            .with_conn(|conn| collection_ops::delete(conn, collection, key))
    }

    fn get_all(&self, collection: Collection) -> PraxisResult<Vec<(String, Value)>> {
        self.writer
            .with_conn(|conn| collection_ops::get_all(conn, collection))
    }

    fn put_all(&self, collection: Collection, rows: &[(String, Value)]) -> PraxisResult<usize> {
        self.writer
            .with_conn(|conn| collection_ops::put_all(conn, collection, rows))
    }

    fn replace_all(
        &self,
        collection: Collection,
        rows: &[(String, Value)],
    ) -> PraxisResult<usize> {
        self.writer
            .with_conn(|conn| collection_ops::replace_all(conn, collection, rows))
    }

    fn clear(&self, collections: &[Collection]) -> PraxisResult<()> {
        self.writer
            .with_conn(|conn| collection_ops::clear(conn, collections))
    }

    fn has_bank(&self, bank_id: &str) -> PraxisResult<bool> {
        self.writer
            .with_conn(|conn| collection_ops::has_bank(conn, bank_id))
    }

    fn replace_bank(&self, bank_id: &str, rows: &[(String, Value)]) -> PraxisResult<usize> {
        self.writer
            .with_conn(|conn| collection_ops::replace_bank(conn, bank_id, rows))
    }

    fn put_result(&self, result: &ExamResult) -> PraxisResult<()> {
        self.writer
            .with_conn(|conn| result_ops::insert_result(conn, result))
    }

    fn get_result(&self, id: &str) -> PraxisResult<Option<ExamResult>> {
        self.writer.with_conn(|conn| result_ops::get_result(conn, id))
    }

    fn unsynced_results(&self, student_id: &str) -> PraxisResult<Vec<ExamResult>> {
        self.writer
            .with_conn(|conn| result_ops::unsynced_results(conn, student_id))
    }

    fn mark_synced(&self, ids: &[String]) -> PraxisResult<usize> {
        self.writer
            .with_conn(|conn| result_ops::mark_synced(conn, ids))
    }

    fn kv_get(&self, student_id: &str, key: &str) -> PraxisResult<Option<Value>> {
        self.writer
            .with_conn(|conn| kv_ops::kv_get(conn, student_id, key))
    }

    fn kv_put(&self, student_id: &str, key: &str, value: &Value) -> PraxisResult<()> {
        self.writer
            .with_conn(|conn| kv_ops::kv_put(conn, student_id, key, value))
    }

    fn kv_delete(&self, student_id: &str, key: &str) -> PraxisResult<()> {
        self.writer
            .with_conn(|conn| kv_ops::kv_delete(conn, student_id, key))
    }
}
