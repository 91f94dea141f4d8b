use serde_json::Value;

use crate::errors::PraxisResult;
use crate::models::ExamResult;

/// The four per-tenant collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Questions,
    Answers,
    Schedules,
    Session,
}

impl Collection {
    /// Stable name used as the storage namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Questions => "questions",
            Collection::Answers => "answers",
            Collection::Schedules => "schedules",
            Collection::Session => "session",
        }
    }

    /// All collections, for full clears.
    pub const ALL: [Collection; 4] = [
        Collection::Questions,
        Collection::Answers,
        Collection::Schedules,
        Collection::Session,
    ];
}

/// Durable per-tenant storage contract.
///
/// Every write is acknowledged only after it is durable; reads reflect the
/// most recent local write. Implementations surface open/commit failures as
/// `StorageError` — retryable on next access, never fatal.
pub trait ITenantStorage: Send + Sync {
    // --- Collections ---
    fn get(&self, collection: Collection, key: &str) -> PraxisResult<Option<Value>>;
    fn put(&self, collection: Collection, key: &str, value: &Value) -> PraxisResult<()>;
    fn delete(&self, collection: Collection, key: &str) -> PraxisResult<()>;
    fn get_all(&self, collection: Collection) -> PraxisResult<Vec<(String, Value)>>;
    /// Upsert all rows as a single durable batch (all-or-nothing).
    fn put_all(&self, collection: Collection, rows: &[(String, Value)]) -> PraxisResult<usize>;
    /// Clear the collection then bulk-insert `rows`, in one transaction.
    /// This is the refresh path: snapshots are replaced, never merged.
    fn replace_all(&self, collection: Collection, rows: &[(String, Value)])
        -> PraxisResult<usize>;
    fn clear(&self, collections: &[Collection]) -> PraxisResult<()>;

    // --- Question banks ---
    /// Whether any question of `bank_id` is cached. Gates offline exam start.
    fn has_bank(&self, bank_id: &str) -> PraxisResult<bool>;
    /// Replace all cached questions of one bank in a single transaction.
    fn replace_bank(&self, bank_id: &str, rows: &[(String, Value)]) -> PraxisResult<usize>;

    // --- Exam results ---
    fn put_result(&self, result: &ExamResult) -> PraxisResult<()>;
    fn get_result(&self, id: &str) -> PraxisResult<Option<ExamResult>>;
    /// The unsynced queue: all results of `student_id` not yet acknowledged.
    fn unsynced_results(&self, student_id: &str) -> PraxisResult<Vec<ExamResult>>;
    /// Flip `synced` to true for the given ids. Monotonic: rows already
    /// synced are left untouched. Returns the number of rows flipped.
    fn mark_synced(&self, ids: &[String]) -> PraxisResult<usize>;

    // --- Student-scoped blobs ---
    fn kv_get(&self, student_id: &str, key: &str) -> PraxisResult<Option<Value>>;
    fn kv_put(&self, student_id: &str, key: &str, value: &Value) -> PraxisResult<()>;
    fn kv_delete(&self, student_id: &str, key: &str) -> PraxisResult<()>;
}
