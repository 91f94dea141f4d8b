//! Engine configuration, TOML-loadable with full defaults.

pub mod defaults;

mod exam_config;
mod store_config;
mod sync_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use exam_config::ExamConfig;
pub use store_config::StoreConfig;
pub use sync_config::SyncConfig;

use crate::errors::{PraxisResult, StorageError};

/// Top-level configuration for the Praxis engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PraxisConfig {
    pub store: StoreConfig,
    pub sync: SyncConfig,
    pub exam: ExamConfig,
}

impl PraxisConfig {
    /// Parse a configuration from a TOML string. Missing sections and
    /// fields fall back to defaults.
    pub fn from_toml_str(raw: &str) -> PraxisResult<Self> {
        toml::from_str(raw).map_err(|e| {
            StorageError::Unavailable {
                reason: format!("config parse: {e}"),
            }
            .into()
        })
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> PraxisResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| StorageError::Unavailable {
            reason: format!("config read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}
