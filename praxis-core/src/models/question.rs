use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached exam question. Immutable once cached; the `bank_id` drives the
/// offline cache-hit check before an exam may start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique question identifier.
    pub id: String,
    /// Question bank this record belongs to.
    pub bank_id: String,
    /// Full question body (text, options, attachments) as issued by the server.
    pub payload: serde_json::Value,
    /// When this record was cached locally.
    pub cached_at: DateTime<Utc>,
}

impl QuestionRecord {
    pub fn new(id: String, bank_id: String, payload: serde_json::Value) -> Self {
        Self {
            id,
            bank_id,
            payload,
            cached_at: Utc::now(),
        }
    }
}
