//! Data model: cached records, the attempt snapshot, and results.

mod active_exam;
mod answer;
mod context;
mod question;
mod report;
mod result;
mod schedule;

pub use active_exam::ActiveExamState;
pub use answer::AnswerDraft;
pub use context::ExamContext;
pub use question::QuestionRecord;
pub use report::SyncReport;
pub use result::ExamResult;
pub use schedule::ScheduleRecord;
