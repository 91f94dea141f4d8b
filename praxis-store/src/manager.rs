//! TenantManager — lazily opened per-tenant stores behind a DashMap.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use praxis_core::config::StoreConfig;
use praxis_core::errors::{PraxisResult, StorageError};

use crate::engine::TenantStore;

/// Registry of open tenant stores. Each tenant's store is opened on first
/// access and lives for the process lifetime, until an explicit reset.
pub struct TenantManager {
    data_dir: PathBuf,
    stores: DashMap<String, Arc<TenantStore>>,
}

impl TenantManager {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            stores: DashMap::new(),
        }
    }

    /// Get the store for `tenant_id`, opening `{data_dir}/{tenant_id}.db`
    /// on first access.
    pub fn open(&self, tenant_id: &str) -> PraxisResult<Arc<TenantStore>> {
        if let Some(store) = self.stores.get(tenant_id) {
            return Ok(store.clone());
        }

        std::fs::create_dir_all(&self.data_dir).map_err(|e| StorageError::Unavailable {
            reason: format!("create {}: {e}", self.data_dir.display()),
        })?;
        let path = self.data_dir.join(format!("{tenant_id}.db"));
        let store = Arc::new(TenantStore::open(&path)?);
        tracing::info!(tenant = %tenant_id, "store: opened tenant database");

        // Another caller may have raced us here; keep whichever landed first.
        Ok(self
            .stores
            .entry(tenant_id.to_string())
            .or_insert(store)
            .clone())
    }

    /// Logout/reset: wipe the tenant's data and drop the cached handle.
    pub fn reset(&self, tenant_id: &str) -> PraxisResult<()> {
        if let Some((_, store)) = self.stores.remove(tenant_id) {
            store.wipe()?;
            tracing::info!(tenant = %tenant_id, "store: tenant reset");
        } else {
            // Not cached: wipe on a fresh handle so on-disk data still goes.
            let path = self.data_dir.join(format!("{tenant_id}.db"));
            if path.exists() {
                TenantStore::open(&path)?.wipe()?;
                tracing::info!(tenant = %tenant_id, "store: tenant reset (cold)");
            }
        }
        Ok(())
    }

    /// Number of currently open tenant stores.
    pub fn open_count(&self) -> usize {
        self.stores.len()
    }
}
