//! Shared test helpers: a scriptable in-memory remote gateway and builders
//! for the records the engine works with.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{json, Value};

use praxis_core::errors::{PraxisResult, SyncError};
use praxis_core::models::{AnswerDraft, ScheduleRecord};
use praxis_core::traits::{
    ChangeCallback, IRemoteGateway, ITenantStorage, RowPayload, SubscriptionHandle, UpsertAck,
};

/// In-memory remote store with scriptable failures.
///
/// Upserts are idempotent by row id: a row the gateway already holds is
/// reported back in `already_exists`, exactly like a remote conflict.
#[derive(Default)]
pub struct MockGateway {
    tables: Mutex<HashMap<String, HashMap<String, RowPayload>>>,
    upsert_calls: Mutex<Vec<(String, Vec<String>)>>,
    fail_next: Mutex<Option<String>>,
    subscribers: Mutex<Vec<(String, ChangeCallback)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next remote call fail with a network error.
    pub fn fail_next(&self, reason: &str) {
        *self.lock(&self.fail_next) = Some(reason.to_string());
    }

    /// Pre-load rows, as if another device had already pushed them.
    pub fn seed(&self, table: &str, rows: Vec<RowPayload>) {
        let mut tables = self.lock(&self.tables);
        let entry = tables.entry(table.to_string()).or_default();
        for row in rows {
            entry.insert(row.id.clone(), row);
        }
    }

    /// Ids recorded per upsert call, in call order.
    pub fn upsert_log(&self) -> Vec<(String, Vec<String>)> {
        self.lock(&self.upsert_calls).clone()
    }

    /// Number of upsert calls that reached the gateway.
    pub fn upsert_call_count(&self) -> usize {
        self.lock(&self.upsert_calls).len()
    }

    /// All rows currently held for a table.
    pub fn rows(&self, table: &str) -> Vec<RowPayload> {
        self.lock(&self.tables)
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Fire every subscription registered for `table`.
    pub fn emit_change(&self, table: &str, row_id: &str) {
        for (sub_table, callback) in self.lock(&self.subscribers).iter() {
            if sub_table == table {
                callback(row_id);
            }
        }
    }

    fn take_failure(&self) -> Option<String> {
        self.lock(&self.fail_next).take()
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IRemoteGateway for MockGateway {
    fn upsert(&self, table: &str, rows: &[RowPayload]) -> PraxisResult<UpsertAck> {
        if let Some(reason) = self.take_failure() {
            return Err(SyncError::NetworkError { reason }.into());
        }
        self.lock(&self.upsert_calls).push((
            table.to_string(),
            rows.iter().map(|r| r.id.clone()).collect(),
        ));

        let mut tables = self.lock(&self.tables);
        let entry = tables.entry(table.to_string()).or_default();
        let mut ack = UpsertAck::default();
        for row in rows {
            if entry.contains_key(&row.id) {
                ack.already_exists.push(row.id.clone());
            } else {
                entry.insert(row.id.clone(), row.clone());
                ack.acked.push(row.id.clone());
            }
        }
        Ok(ack)
    }

    fn select(&self, table: &str, filters: &[(String, String)]) -> PraxisResult<Vec<RowPayload>> {
        if let Some(reason) = self.take_failure() {
            return Err(SyncError::NetworkError { reason }.into());
        }
        let tables = self.lock(&self.tables);
        let Some(rows) = tables.get(table) else {
            return Ok(Vec::new());
        };
        let matched = rows
            .values()
            .filter(|row| {
                filters.iter().all(|(column, value)| {
                    if column == "id" {
                        return row.id == *value;
                    }
                    match &row.data[column.as_str()] {
                        Value::String(s) => s == value,
                        other => other.to_string() == *value,
                    }
                })
            })
            .cloned()
            .collect();
        Ok(matched)
    }

    fn subscribe(
        &self,
        table: &str,
        _filter: Option<(String, String)>,
        on_change: ChangeCallback,
    ) -> Option<SubscriptionHandle> {
        let mut subscribers = self.lock(&self.subscribers);
        subscribers.push((table.to_string(), on_change));
        Some(SubscriptionHandle {
            id: subscribers.len() as u64,
        })
    }
}

// ── Record builders ───────────────────────────────────────────────────────

/// A schedule drawing from `bank_id` with the given duration.
pub fn schedule(id: &str, bank_id: &str, duration_minutes: i64) -> ScheduleRecord {
    ScheduleRecord {
        id: id.to_string(),
        bank_id: bank_id.to_string(),
        title: format!("Exam {id}"),
        starts_at: None,
        duration_minutes,
        payload: json!({}),
    }
}

/// `(key, payload)` rows for `count` questions of one bank, ready for
/// `put_all(Collection::Questions, ..)`.
pub fn question_rows(bank_id: &str, count: usize) -> Vec<(String, Value)> {
    (0..count)
        .map(|i| {
            let id = format!("{bank_id}-q{i}");
            (
                id.clone(),
                json!({
                    "id": id,
                    "bank_id": bank_id,
                    "payload": {"text": format!("Question {i}")},
                    "cached_at": Utc::now(),
                }),
            )
        })
        .collect()
}

/// Cache a whole bank into the store, as a prior sync would have.
pub fn cache_bank(store: &dyn ITenantStorage, bank_id: &str, count: usize) {
    store
        .put_all(
            praxis_core::traits::Collection::Questions,
            &question_rows(bank_id, count),
        )
        .expect("caching fixture bank");
}

/// An answer draft for one question.
pub fn draft(question_id: &str, choice: &str) -> AnswerDraft {
    AnswerDraft::new(question_id.to_string(), json!({"choice": choice}))
}

/// A remote row carrying a schedule, as the gateway would serve it.
pub fn schedule_row(record: &ScheduleRecord) -> RowPayload {
    RowPayload {
        id: record.id.clone(),
        data: serde_json::to_value(record).expect("serializing schedule fixture"),
        modified_at: Utc::now(),
    }
}
