use serde::{Deserialize, Serialize};

/// Explicit scope threaded into the session controller and reconciler:
/// which institution's partition, which student's attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamContext {
    /// Institution identifier; selects the tenant store partition.
    pub tenant_id: String,
    /// Student identifier; scopes the attempt snapshot and unsynced queue.
    pub student_id: String,
}

impl ExamContext {
    pub fn new(tenant_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            student_id: student_id.into(),
        }
    }
}
