use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-issued exam schedule snapshot.
///
/// Fully replaced (not merged) on each successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// Unique schedule identifier.
    pub id: String,
    /// Question bank this schedule draws from.
    pub bank_id: String,
    /// Display title.
    pub title: String,
    /// When the exam window opens, if the server constrains it.
    pub starts_at: Option<DateTime<Utc>>,
    /// Attempt duration in minutes; expiry = login time + duration.
    pub duration_minutes: i64,
    /// Remaining server-issued fields, carried opaquely.
    pub payload: serde_json::Value,
}

impl ScheduleRecord {
    /// Attempt duration as a chrono duration.
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.duration_minutes)
    }
}
