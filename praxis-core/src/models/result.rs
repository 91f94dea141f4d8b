use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AnswerDraft;

/// The durable outcome of one exam attempt.
///
/// One per attempt; the id is assigned at attempt creation and never
/// changes. The `synced` flag is monotonic: false → true once the remote
/// acknowledges the row, never back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    /// Attempt id, globally unique, assigned when the attempt starts.
    pub id: String,
    /// Student who produced this result.
    pub student_id: String,
    /// Schedule the attempt ran under.
    pub schedule_id: String,
    /// Snapshot of all answer drafts at finish time.
    pub answers: Vec<AnswerDraft>,
    /// Number of questions with a draft at finish time.
    pub answered_count: usize,
    /// True when the attempt ended by timer expiry rather than manual submit.
    pub time_expired: bool,
    /// When the attempt finished.
    pub finished_at: DateTime<Utc>,
    /// Whether the remote store has acknowledged this row.
    pub synced: bool,
}

impl ExamResult {
    /// Build a result from the drafts present at finish time.
    pub fn from_drafts(
        attempt_id: String,
        student_id: String,
        schedule_id: String,
        answers: Vec<AnswerDraft>,
        time_expired: bool,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let answered_count = answers.len();
        Self {
            id: attempt_id,
            student_id,
            schedule_id,
            answers,
            answered_count,
            time_expired,
            finished_at,
            synced: false,
        }
    }
}
