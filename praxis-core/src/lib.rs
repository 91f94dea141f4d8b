//! # praxis-core
//!
//! Foundation crate for the Praxis offline exam engine.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod telemetry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PraxisConfig;
pub use errors::{PraxisError, PraxisResult};
pub use models::{
    ActiveExamState, AnswerDraft, ExamContext, ExamResult, QuestionRecord, ScheduleRecord,
    SyncReport,
};
pub use traits::{Cancellable, CancellationToken, IRemoteGateway, ITenantStorage};
