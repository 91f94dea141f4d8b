use serde::{Deserialize, Serialize};

use super::defaults;

/// Exam session controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    /// Interval between cooperative expiry checks (seconds).
    pub tick_interval_secs: u64,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: defaults::DEFAULT_TICK_INTERVAL_SECS,
        }
    }
}
