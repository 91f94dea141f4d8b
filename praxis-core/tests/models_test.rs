use chrono::{Duration, TimeZone, Utc};
use praxis_core::models::*;
use serde_json::json;

fn schedule(duration_minutes: i64) -> ScheduleRecord {
    ScheduleRecord {
        id: "sched-1".into(),
        bank_id: "bank-1".into(),
        title: "Midterm".into(),
        starts_at: None,
        duration_minutes,
        payload: json!({}),
    }
}

#[test]
fn active_exam_expiry_is_login_plus_duration() {
    let login = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    let state = ActiveExamState::begin("stu-1".into(), &schedule(60), login);

    assert_eq!(state.started_at, login);
    assert_eq!(state.expires_at, login + Duration::minutes(60));
    assert_eq!(state.schedule_id, "sched-1");
    assert_eq!(state.bank_id, "bank-1");
}

#[test]
fn active_exam_expired_only_after_expiry() {
    let login = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    let state = ActiveExamState::begin("stu-1".into(), &schedule(60), login);

    assert!(!state.is_expired(login + Duration::minutes(59)));
    assert!(!state.is_expired(login + Duration::minutes(60)));
    assert!(state.is_expired(login + Duration::minutes(61)));
}

#[test]
fn active_exam_remaining_clamps_to_zero() {
    let login = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    let state = ActiveExamState::begin("stu-1".into(), &schedule(30), login);

    assert_eq!(
        state.remaining(login + Duration::minutes(10)),
        Duration::minutes(20)
    );
    assert_eq!(
        state.remaining(login + Duration::minutes(45)),
        Duration::zero()
    );
}

#[test]
fn attempt_ids_are_unique() {
    let login = Utc::now();
    let a = ActiveExamState::begin("stu-1".into(), &schedule(60), login);
    let b = ActiveExamState::begin("stu-1".into(), &schedule(60), login);
    assert_ne!(a.attempt_id, b.attempt_id);
}

#[test]
fn result_from_drafts_counts_answers_and_starts_unsynced() {
    let drafts = vec![
        AnswerDraft::new("q1".into(), json!({"choice": "A"})),
        AnswerDraft::new("q2".into(), json!({"choice": "C"})),
    ];
    let result = ExamResult::from_drafts(
        "att-1".into(),
        "stu-1".into(),
        "sched-1".into(),
        drafts,
        false,
        Utc::now(),
    );

    assert_eq!(result.answered_count, 2);
    assert!(!result.synced);
    assert!(!result.time_expired);
}

#[test]
fn active_exam_round_trips_through_json() {
    let login = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    let state = ActiveExamState::begin("stu-1".into(), &schedule(90), login);

    let raw = serde_json::to_string(&state).unwrap();
    let back: ActiveExamState = serde_json::from_str(&raw).unwrap();
    assert_eq!(back.attempt_id, state.attempt_id);
    assert_eq!(back.expires_at, state.expires_at);
}

#[test]
fn sync_report_flushed_sums_acks_and_ignored_conflicts() {
    let report = SyncReport {
        pushed: 3,
        conflicts_ignored: 2,
        coalesced: false,
    };
    assert_eq!(report.flushed(), 5);
}
