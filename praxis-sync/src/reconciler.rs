//! SyncReconciler — drains the unsynced-result queue into the remote store.
//!
//! Exactly-once recording despite flaky connectivity: a result row leaves
//! the queue only when the gateway has acknowledged it (or already holds
//! it), and only one reconciliation pass runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use praxis_core::constants::RESULTS_TABLE;
use praxis_core::errors::PraxisResult;
use praxis_core::models::{ExamContext, ExamResult, SyncReport};
use praxis_core::traits::{CancellationToken, IRemoteGateway, ITenantStorage, RowPayload};

/// Pushes unsynced exam results to the remote gateway.
pub struct SyncReconciler {
    gateway: Arc<dyn IRemoteGateway>,
    batch_size: usize,
    in_flight: AtomicBool,
}

impl SyncReconciler {
    pub fn new(gateway: Arc<dyn IRemoteGateway>, batch_size: usize) -> Self {
        Self {
            gateway,
            batch_size: batch_size.max(1),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Single-flight: a pass triggered while another is running is coalesced
    /// (dropped) and reports itself as such — both would read and mutate the
    /// same unsynced set. On `NetworkError` the queue is left untouched for
    /// the next connectivity event; there is no internal backoff. Rows the
    /// remote already holds count as flushed (ConflictIgnorable).
    pub fn push(
        &self,
        store: &dyn ITenantStorage,
        ctx: &ExamContext,
        token: &CancellationToken,
    ) -> PraxisResult<SyncReport> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::debug!("sync: pass already in flight, coalescing");
            return Ok(SyncReport {
                coalesced: true,
                ..Default::default()
            });
        }
        let _guard = InFlightGuard(&self.in_flight);
        self.push_inner(store, ctx, token)
    }

    fn push_inner(
        &self,
        store: &dyn ITenantStorage,
        ctx: &ExamContext,
        token: &CancellationToken,
    ) -> PraxisResult<SyncReport> {
        token.guard()?;
        let pending = store.unsynced_results(&ctx.student_id)?;
        if pending.is_empty() {
            return Ok(SyncReport::default());
        }
        tracing::info!(count = pending.len(), "sync: pushing unsynced results");

        let mut report = SyncReport::default();
        for chunk in pending.chunks(self.batch_size) {
            token.guard()?;
            let rows = chunk
                .iter()
                .map(result_row)
                .collect::<PraxisResult<Vec<_>>>()?;

            // NetworkError propagates from here with the queue untouched.
            let ack = self.gateway.upsert(RESULTS_TABLE, &rows)?;

            // Flip synced only for the subset the gateway settled.
            store.mark_synced(&ack.settled_ids())?;
            report.pushed += ack.acked.len();
            report.conflicts_ignored += ack.already_exists.len();
        }

        tracing::info!(
            pushed = report.pushed,
            conflicts = report.conflicts_ignored,
            "sync: pass complete"
        );
        Ok(report)
    }
}

/// Serialize a result for transport.
fn result_row(result: &ExamResult) -> PraxisResult<RowPayload> {
    Ok(RowPayload {
        id: result.id.clone(),
        data: serde_json::to_value(result)?,
        modified_at: result.finished_at,
    })
}

/// Resets the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
