//! ExpiryWatcher tests: background auto-finish and cancellation on drop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use praxis_core::models::ExamContext;
use praxis_session::{ExamPhase, ExamSessionController, ExpiryWatcher};
use praxis_store::TenantStore;
use test_fixtures::{cache_bank, draft, schedule};

fn expired_controller() -> Arc<ExamSessionController> {
    let store = Arc::new(TenantStore::open_in_memory().unwrap());
    cache_bank(store.as_ref(), "bank-1", 2);
    let ctrl = ExamSessionController::new(store, ExamContext::new("acme-u", "stu-1"));

    // Attempt whose window already closed: 08:00 start, 60 minutes, and the
    // wall clock is well past that.
    let login = Utc::now() - ChronoDuration::minutes(90);
    ctrl.start_at(&schedule("sched-1", "bank-1", 60), login).unwrap();
    ctrl.save_answer(&draft("q1", "A")).unwrap();
    Arc::new(ctrl)
}

async fn wait_for_phase(ctrl: &ExamSessionController, phase: ExamPhase) {
    for _ in 0..100 {
        if ctrl.phase() == phase {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("controller never reached {phase:?}");
}

#[tokio::test]
async fn watcher_auto_finishes_expired_attempt() {
    let ctrl = expired_controller();
    let watcher = ExpiryWatcher::spawn(ctrl.clone(), 1);

    wait_for_phase(&ctrl, ExamPhase::Expired).await;
    watcher.shutdown().await;

    let result = ctrl.finish().unwrap(); // idempotent replay of the auto-finish
    assert!(result.time_expired);
    assert_eq!(result.answered_count, 1);
}

#[tokio::test]
async fn dropped_watcher_stops_ticking() {
    let store = Arc::new(TenantStore::open_in_memory().unwrap());
    cache_bank(store.as_ref(), "bank-1", 2);
    let ctrl = Arc::new(ExamSessionController::new(
        store,
        ExamContext::new("acme-u", "stu-1"),
    ));
    ctrl.start(&schedule("sched-1", "bank-1", 60)).unwrap();

    let watcher = ExpiryWatcher::spawn(ctrl.clone(), 1);
    drop(watcher);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ctrl.phase(), ExamPhase::InProgress);
}

#[tokio::test]
async fn shutdown_cancels_token() {
    let ctrl = expired_controller();
    let watcher = ExpiryWatcher::spawn(ctrl.clone(), 1);
    assert!(!watcher.is_cancelled());
    watcher.shutdown().await;
}
