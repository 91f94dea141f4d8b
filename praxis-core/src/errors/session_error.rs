/// Exam attempt lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The schedule's question bank is absent from the local cache.
    /// User-actionable: the exam cannot start offline without a prior sync.
    #[error("question bank {bank_id} is not cached locally")]
    BankNotCached { bank_id: String },

    #[error("student {student_id} already has an exam in progress (attempt {attempt_id})")]
    ExamAlreadyActive {
        student_id: String,
        attempt_id: String,
    },

    #[error("no active exam for student {student_id}")]
    NoActiveExam { student_id: String },
}
