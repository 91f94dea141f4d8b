use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PraxisResult;

/// A serialized row for transport to or from the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowPayload {
    /// Row id; upserts are idempotent by this id.
    pub id: String,
    /// Full serialized row JSON.
    pub data: serde_json::Value,
    /// When this version was produced.
    pub modified_at: DateTime<Utc>,
}

/// Acknowledgement of a bulk upsert.
///
/// `already_exists` rows conflicted on id at the remote; the core treats
/// them exactly like acked rows (ConflictIgnorable).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertAck {
    pub acked: Vec<String>,
    pub already_exists: Vec<String>,
}

impl UpsertAck {
    /// Ids the remote now durably holds, whichever way they got there.
    pub fn settled_ids(&self) -> Vec<String> {
        let mut ids = self.acked.clone();
        ids.extend(self.already_exists.iter().cloned());
        ids
    }
}

/// Callback invoked with the changed row id on a push notification.
pub type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Opaque handle keeping a subscription alive.
#[derive(Debug)]
pub struct SubscriptionHandle {
    pub id: u64,
}

/// Contract of the authoritative remote store.
///
/// The core never treats gateway unavailability as fatal; every failure
/// maps to `SyncError::NetworkError` and the engine degrades to
/// offline-cached behavior.
pub trait IRemoteGateway: Send + Sync {
    /// Bulk upsert, idempotent by row id.
    fn upsert(&self, table: &str, rows: &[RowPayload]) -> PraxisResult<UpsertAck>;

    /// Select rows matching all `(column, value)` filters.
    fn select(&self, table: &str, filters: &[(String, String)]) -> PraxisResult<Vec<RowPayload>>;

    /// Subscribe to change notifications. Returns `None` when the transport
    /// has no push channel; callers then rely on connectivity-edge refresh.
    fn subscribe(
        &self,
        table: &str,
        filter: Option<(String, String)>,
        on_change: ChangeCallback,
    ) -> Option<SubscriptionHandle>;
}
