use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scratch answer for one question, keyed by question id.
///
/// Last write wins; mutated only by the session controller while the
/// attempt is in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerDraft {
    /// Question this draft answers.
    pub question_id: String,
    /// Answer body (selected options, free text) in server format.
    pub payload: serde_json::Value,
    /// When this draft was last written.
    pub updated_at: DateTime<Utc>,
}

impl AnswerDraft {
    pub fn new(question_id: String, payload: serde_json::Value) -> Self {
        Self {
            question_id,
            payload,
            updated_at: Utc::now(),
        }
    }
}
