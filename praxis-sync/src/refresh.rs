//! Cache refresh: pull schedules and question banks from the remote and
//! replace the local snapshots.
//!
//! Every operation takes a cancellation token and re-checks it between the
//! remote call and the local write-back, so a superseded load can never
//! overwrite fresher data with its late-arriving response.

use praxis_core::constants::{QUESTIONS_TABLE, SCHEDULES_TABLE};
use praxis_core::errors::PraxisResult;
use praxis_core::models::{ExamContext, SyncReport};
use praxis_core::traits::{CancellationToken, Collection, IRemoteGateway, ITenantStorage};

use crate::reconciler::SyncReconciler;

/// Replace the local schedule snapshot with the remote one.
///
/// The gateway endpoint is already tenant-scoped, so no extra filter is
/// sent. Returns the number of schedules cached.
pub fn refresh_schedules(
    store: &dyn ITenantStorage,
    gateway: &dyn IRemoteGateway,
    token: &CancellationToken,
) -> PraxisResult<usize> {
    token.guard()?;
    let rows = gateway.select(SCHEDULES_TABLE, &[])?;

    // Superseded between response and write-back: drop the stale snapshot.
    token.guard()?;
    let records: Vec<(String, serde_json::Value)> = rows
        .into_iter()
        .map(|row| (row.id, row.data))
        .collect();
    store.replace_all(Collection::Schedules, &records)
}

/// Replace the cached questions of one bank with the remote ones.
pub fn refresh_bank(
    store: &dyn ITenantStorage,
    gateway: &dyn IRemoteGateway,
    bank_id: &str,
    token: &CancellationToken,
) -> PraxisResult<usize> {
    token.guard()?;
    let rows = gateway.select(
        QUESTIONS_TABLE,
        &[("bank_id".to_string(), bank_id.to_string())],
    )?;

    token.guard()?;
    let records: Vec<(String, serde_json::Value)> = rows
        .into_iter()
        .map(|row| (row.id, row.data))
        .collect();
    store.replace_bank(bank_id, &records)
}

/// Full refresh: schedules, then every bank the schedules reference, then a
/// reconciliation pass for pending results.
pub fn full_refresh(
    store: &dyn ITenantStorage,
    gateway: &dyn IRemoteGateway,
    reconciler: &SyncReconciler,
    ctx: &ExamContext,
    token: &CancellationToken,
) -> PraxisResult<SyncReport> {
    let schedule_count = refresh_schedules(store, gateway, token)?;

    let mut bank_ids: Vec<String> = store
        .get_all(Collection::Schedules)?
        .into_iter()
        .filter_map(|(_, data)| data["bank_id"].as_str().map(str::to_string))
        .collect();
    bank_ids.sort();
    bank_ids.dedup();

    for bank_id in &bank_ids {
        refresh_bank(store, gateway, bank_id, token)?;
    }
    tracing::info!(
        schedules = schedule_count,
        banks = bank_ids.len(),
        "refresh: caches replaced"
    );

    reconciler.push(store, ctx, token)
}
