use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Local tenant store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one SQLite file per tenant.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(defaults::DEFAULT_DATA_DIR),
        }
    }
}
