use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScheduleRecord;

/// Persisted snapshot of an in-progress exam attempt.
///
/// Written the moment an attempt starts and kept current in the tenant
/// store so the attempt survives a crash, reload, or navigation away.
/// Invariant: at most one per student at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveExamState {
    /// Attempt id, carried forward into the eventual [`super::ExamResult`].
    pub attempt_id: String,
    /// Student taking the exam.
    pub student_id: String,
    /// Schedule the attempt runs under.
    pub schedule_id: String,
    /// Question bank the attempt draws from.
    pub bank_id: String,
    /// When the student logged into the attempt.
    pub started_at: DateTime<Utc>,
    /// Hard expiry: `started_at` + schedule duration.
    pub expires_at: DateTime<Utc>,
}

impl ActiveExamState {
    /// Build the snapshot for a fresh attempt starting at `now`.
    pub fn begin(student_id: String, schedule: &ScheduleRecord, now: DateTime<Utc>) -> Self {
        Self {
            attempt_id: uuid::Uuid::new_v4().to_string(),
            student_id,
            schedule_id: schedule.id.clone(),
            bank_id: schedule.bank_id.clone(),
            started_at: now,
            expires_at: now + schedule.duration(),
        }
    }

    /// Whether the attempt has run past its expiry at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time left at `now`; zero once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> chrono::Duration {
        (self.expires_at - now).max(chrono::Duration::zero())
    }
}
