/// Praxis engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Student-kv key holding the persisted in-progress exam snapshot.
pub const ACTIVE_EXAM_KEY: &str = "active_exam";

/// Student-kv key holding UI preference flags (panel collapse state).
pub const PANEL_PREFS_KEY: &str = "panel_prefs";

/// Maximum number of results pushed to the remote in one upsert batch.
pub const MAX_PUSH_BATCH_SIZE: usize = 100;

/// Remote table receiving exam results.
pub const RESULTS_TABLE: &str = "exam_results";

/// Remote table serving exam schedules.
pub const SCHEDULES_TABLE: &str = "exam_schedules";

/// Remote table serving question banks.
pub const QUESTIONS_TABLE: &str = "question_banks";
