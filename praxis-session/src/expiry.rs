//! Cooperative expiry watcher: a cancellable periodic tick against the
//! session controller. Torn down on drop so a timer never fires against a
//! view that navigated away.

use std::sync::Arc;
use std::time::Duration;

use praxis_core::traits::{Cancellable, CancellationToken};

use crate::controller::ExamSessionController;

/// Periodically invokes [`ExamSessionController::tick`] until the attempt
/// finishes or the watcher is cancelled.
pub struct ExpiryWatcher {
    token: CancellationToken,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl ExpiryWatcher {
    /// Spawn the watcher on the current tokio runtime.
    pub fn spawn(controller: Arc<ExamSessionController>, tick_interval_secs: u64) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(tick_interval_secs.max(1)));
            // The immediate first tick is fine: an already-expired resumed
            // attempt finishes right away.
            loop {
                interval.tick().await;
                if task_token.is_cancelled() {
                    break;
                }
                match controller.tick() {
                    Ok(Some(result)) => {
                        tracing::info!(attempt = %result.id, "expiry: attempt auto-finished");
                        break;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // Storage hiccups are retryable on the next tick.
                        tracing::warn!("expiry: tick failed: {e}");
                    }
                }
            }
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Stop the watcher and wait for the task to wind down.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }

    /// Whether the watcher has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ExpiryWatcher {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
