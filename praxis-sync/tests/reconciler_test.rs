//! Reconciler tests: the offline-finish-then-sync path, network failure
//! recovery, remote conflicts, batching, and single-flight coalescing.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use praxis_core::constants::RESULTS_TABLE;
use praxis_core::errors::{PraxisError, PraxisResult, SyncError};
use praxis_core::models::{ExamContext, ExamResult};
use praxis_core::traits::{
    Cancellable, CancellationToken, ChangeCallback, IRemoteGateway, ITenantStorage, RowPayload,
    SubscriptionHandle, UpsertAck,
};
use praxis_store::TenantStore;
use praxis_sync::SyncReconciler;
use test_fixtures::{draft, MockGateway};

fn make_result(id: &str, student: &str) -> ExamResult {
    ExamResult::from_drafts(
        id.to_string(),
        student.to_string(),
        "sched-1".to_string(),
        vec![draft("q1", "B")],
        false,
        Utc::now(),
    )
}

fn ctx() -> ExamContext {
    ExamContext::new("acme-u", "stu-1")
}

// ── Push path ─────────────────────────────────────────────────────────────

#[test]
fn offline_finish_then_connectivity_flushes_once() {
    let store = TenantStore::open_in_memory().unwrap();
    let gateway = Arc::new(MockGateway::new());
    let reconciler = SyncReconciler::new(gateway.clone(), 100);

    // Finished offline: queued unsynced.
    store.put_result(&make_result("att-1", "stu-1")).unwrap();
    assert_eq!(store.unsynced_results("stu-1").unwrap().len(), 1);

    // Connectivity event: one push, local record flipped.
    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.pushed, 1);
    assert_eq!(report.conflicts_ignored, 0);
    assert!(!report.coalesced);
    assert!(store.unsynced_results("stu-1").unwrap().is_empty());
    assert!(store.get_result("att-1").unwrap().unwrap().synced);
    assert_eq!(gateway.rows(RESULTS_TABLE).len(), 1);

    // Repeating the event pushes nothing.
    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.flushed(), 0);
    assert_eq!(gateway.upsert_call_count(), 1);
}

#[test]
fn network_error_leaves_queue_for_next_pass() {
    let store = TenantStore::open_in_memory().unwrap();
    let gateway = Arc::new(MockGateway::new());
    let reconciler = SyncReconciler::new(gateway.clone(), 100);
    store.put_result(&make_result("att-1", "stu-1")).unwrap();

    gateway.fail_next("connection reset");
    let err = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap_err();
    assert!(err.is_network());

    // The result reappears in the next pass and flushes cleanly.
    assert_eq!(store.unsynced_results("stu-1").unwrap().len(), 1);
    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.pushed, 1);
    assert!(store.unsynced_results("stu-1").unwrap().is_empty());
}

#[test]
fn remote_conflict_counts_as_flushed() {
    let store = TenantStore::open_in_memory().unwrap();
    let gateway = Arc::new(MockGateway::new());
    let reconciler = SyncReconciler::new(gateway.clone(), 100);

    // Another device already pushed this attempt.
    let result = make_result("att-1", "stu-1");
    gateway.seed(
        RESULTS_TABLE,
        vec![RowPayload {
            id: "att-1".to_string(),
            data: serde_json::to_value(&result).unwrap(),
            modified_at: Utc::now(),
        }],
    );
    store.put_result(&result).unwrap();

    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.pushed, 0);
    assert_eq!(report.conflicts_ignored, 1);
    assert_eq!(report.flushed(), 1);
    assert!(store.get_result("att-1").unwrap().unwrap().synced);
}

#[test]
fn pushes_in_batches() {
    let store = TenantStore::open_in_memory().unwrap();
    let gateway = Arc::new(MockGateway::new());
    let reconciler = SyncReconciler::new(gateway.clone(), 2);

    for i in 0..5 {
        store
            .put_result(&make_result(&format!("att-{i}"), "stu-1"))
            .unwrap();
    }

    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.pushed, 5);
    assert_eq!(gateway.upsert_call_count(), 3);
    for (_, ids) in gateway.upsert_log() {
        assert!(ids.len() <= 2);
    }
}

#[test]
fn only_this_students_results_are_pushed() {
    let store = TenantStore::open_in_memory().unwrap();
    let gateway = Arc::new(MockGateway::new());
    let reconciler = SyncReconciler::new(gateway.clone(), 100);

    store.put_result(&make_result("att-mine", "stu-1")).unwrap();
    store.put_result(&make_result("att-other", "stu-2")).unwrap();

    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.pushed, 1);
    assert_eq!(store.unsynced_results("stu-2").unwrap().len(), 1);
}

// ── Cancellation ──────────────────────────────────────────────────────────

#[test]
fn cancelled_pass_touches_nothing_and_releases_the_flag() {
    let store = TenantStore::open_in_memory().unwrap();
    let gateway = Arc::new(MockGateway::new());
    let reconciler = SyncReconciler::new(gateway.clone(), 100);
    store.put_result(&make_result("att-1", "stu-1")).unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let err = reconciler.push(&store, &ctx(), &token).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(gateway.upsert_call_count(), 0);
    assert_eq!(store.unsynced_results("stu-1").unwrap().len(), 1);

    // The in-flight flag was released; a fresh token drains the queue.
    let report = reconciler
        .push(&store, &ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(report.pushed, 1);
}

// ── Single flight ─────────────────────────────────────────────────────────

/// Gateway that parks the upsert call until released, so a second pass can
/// provably overlap the first.
struct ParkedGateway {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
    inner: MockGateway,
}

impl IRemoteGateway for ParkedGateway {
    fn upsert(&self, table: &str, rows: &[RowPayload]) -> PraxisResult<UpsertAck> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        self.inner.upsert(table, rows)
    }

    fn select(&self, table: &str, filters: &[(String, String)]) -> PraxisResult<Vec<RowPayload>> {
        self.inner.select(table, filters)
    }

    fn subscribe(
        &self,
        table: &str,
        filter: Option<(String, String)>,
        on_change: ChangeCallback,
    ) -> Option<SubscriptionHandle> {
        self.inner.subscribe(table, filter, on_change)
    }
}

#[test]
fn overlapping_pass_is_coalesced() {
    let store = Arc::new(TenantStore::open_in_memory().unwrap());
    store.put_result(&make_result("att-1", "stu-1")).unwrap();

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let gateway = Arc::new(ParkedGateway {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        inner: MockGateway::new(),
    });
    let reconciler = Arc::new(SyncReconciler::new(gateway.clone(), 100));

    let first = {
        let reconciler = Arc::clone(&reconciler);
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            reconciler.push(store.as_ref(), &ctx(), &CancellationToken::new())
        })
    };

    // First pass is parked inside the gateway call.
    entered_rx.recv().unwrap();
    let report = reconciler
        .push(store.as_ref(), &ctx(), &CancellationToken::new())
        .unwrap();
    assert!(report.coalesced);
    assert_eq!(report.flushed(), 0);

    release_tx.send(()).unwrap();
    let report = first.join().unwrap().unwrap();
    assert_eq!(report.pushed, 1);
    assert_eq!(gateway.inner.upsert_call_count(), 1);
}

// ── Error taxonomy ────────────────────────────────────────────────────────

#[test]
fn gateway_failures_map_to_network_errors() {
    let gateway = MockGateway::new();
    gateway.fail_next("dns failure");
    let err = gateway.upsert(RESULTS_TABLE, &[]).unwrap_err();
    assert!(matches!(
        err,
        PraxisError::SyncError(SyncError::NetworkError { .. })
    ));
}
