//! Connectivity monitor: turns online/offline edges into sync work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use praxis_core::constants::SCHEDULES_TABLE;
use praxis_core::errors::PraxisResult;
use praxis_core::models::ExamContext;
use praxis_core::traits::{
    Cancellable, CancellationToken, IRemoteGateway, ITenantStorage, SubscriptionHandle,
};

use crate::reconciler::SyncReconciler;
use crate::refresh;

/// Watches connectivity and drives the reconciler on offline-to-online
/// edges. Repeated reports of the same state are no-ops; flapping cancels
/// the in-progress pass before starting the next one.
pub struct ConnectivityMonitor {
    store: Arc<dyn ITenantStorage>,
    gateway: Arc<dyn IRemoteGateway>,
    reconciler: Arc<SyncReconciler>,
    ctx: ExamContext,
    online: AtomicBool,
    current_token: Mutex<Option<CancellationToken>>,
    subscription: Mutex<Option<SubscriptionHandle>>,
}

impl ConnectivityMonitor {
    pub fn new(
        store: Arc<dyn ITenantStorage>,
        gateway: Arc<dyn IRemoteGateway>,
        reconciler: Arc<SyncReconciler>,
        ctx: ExamContext,
    ) -> Self {
        Self {
            store,
            gateway,
            reconciler,
            ctx,
            online: AtomicBool::new(false),
            current_token: Mutex::new(None),
            subscription: Mutex::new(None),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Report the current connectivity state. Edge-triggered: the first
    /// offline-to-online transition refreshes caches and drains the result
    /// queue; going offline cancels whatever pass is in flight.
    pub fn set_online(&self, online: bool) {
        let was_online = self.online.swap(online, Ordering::AcqRel);
        if was_online == online {
            return;
        }

        if !online {
            tracing::info!("monitor: connectivity lost");
            if let Some(token) = lock(&self.current_token).take() {
                token.cancel();
            }
            return;
        }

        tracing::info!("monitor: connectivity restored, reconciling");
        let token = self.supersede();
        match refresh::full_refresh(
            self.store.as_ref(),
            self.gateway.as_ref(),
            &self.reconciler,
            &self.ctx,
            &token,
        ) {
            Ok(report) => {
                tracing::info!(flushed = report.flushed(), "monitor: reconciliation done");
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!("monitor: reconciliation superseded");
            }
            Err(e) => {
                // Deferred until the next edge or explicit sync_now.
                tracing::warn!("monitor: reconciliation deferred: {e}");
            }
        }
    }

    /// Push pending results immediately, surfacing the error to the caller.
    /// Returns the number of results the remote now holds.
    pub fn sync_now(&self) -> PraxisResult<usize> {
        let token = self.supersede();
        let report = self.reconciler.push(self.store.as_ref(), &self.ctx, &token)?;
        Ok(report.flushed())
    }

    /// Refresh cached schedules and banks, best effort.
    pub fn refresh(&self) -> PraxisResult<()> {
        let token = self.supersede();
        refresh::full_refresh(
            self.store.as_ref(),
            self.gateway.as_ref(),
            &self.reconciler,
            &self.ctx,
            &token,
        )?;
        Ok(())
    }

    /// Wire up push notifications where the transport supports them. A
    /// schedule change triggers a refresh; transports without a push channel
    /// return `None` and the monitor stays edge-driven.
    pub fn subscribe_changes(self: &Arc<Self>) {
        let monitor = Arc::clone(self);
        let handle = self.gateway.subscribe(
            SCHEDULES_TABLE,
            None,
            Arc::new(move |row_id| {
                tracing::debug!(row_id, "monitor: remote schedule changed");
                if monitor.is_online() {
                    if let Err(e) = monitor.refresh() {
                        if !e.is_cancelled() {
                            tracing::warn!("monitor: change-driven refresh failed: {e}");
                        }
                    }
                }
            }),
        );
        *lock(&self.subscription) = handle;
    }

    /// Cancel the predecessor pass and mint the token for a new one.
    fn supersede(&self) -> CancellationToken {
        let mut current = lock(&self.current_token);
        if let Some(prev) = current.take() {
            prev.cancel();
        }
        let token = CancellationToken::new();
        *current = Some(token.clone());
        token
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
