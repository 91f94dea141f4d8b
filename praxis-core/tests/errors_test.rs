use praxis_core::errors::*;

#[test]
fn bank_not_cached_carries_bank_id() {
    let err = SessionError::BankNotCached {
        bank_id: "bank-7".into(),
    };
    assert!(err.to_string().contains("bank-7"));
}

#[test]
fn exam_already_active_carries_both_ids() {
    let err = SessionError::ExamAlreadyActive {
        student_id: "stu-1".into(),
        attempt_id: "att-9".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("stu-1"));
    assert!(msg.contains("att-9"));
}

#[test]
fn storage_unavailable_carries_reason() {
    let err = StorageError::Unavailable {
        reason: "disk full".into(),
    };
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn network_error_carries_reason() {
    let err = SyncError::NetworkError {
        reason: "connection refused".into(),
    };
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn remote_rejection_carries_reason() {
    let err: PraxisError = SyncError::RemoteRejected {
        reason: "schema mismatch".into(),
    }
    .into();
    assert!(err.to_string().contains("schema mismatch"));
    assert!(!err.is_network());
}

// --- From impls ---

#[test]
fn storage_error_converts_to_praxis_error() {
    let storage_err = StorageError::CommitFailed {
        reason: "locked".into(),
    };
    let err: PraxisError = storage_err.into();
    assert!(matches!(err, PraxisError::StorageError(_)));
}

#[test]
fn session_error_converts_to_praxis_error() {
    let session_err = SessionError::NoActiveExam {
        student_id: "stu-2".into(),
    };
    let err: PraxisError = session_err.into();
    assert!(matches!(err, PraxisError::SessionError(_)));
}

#[test]
fn sync_error_converts_to_praxis_error() {
    let sync_err = SyncError::NetworkError {
        reason: "timeout".into(),
    };
    let err: PraxisError = sync_err.into();
    assert!(err.is_network());
}

#[test]
fn serialization_error_converts_to_praxis_error() {
    let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
    let err: PraxisError = json_err.into();
    assert!(matches!(err, PraxisError::SerializationError(_)));
}

// --- Classification helpers ---

#[test]
fn cancelled_is_classified_as_cancelled() {
    assert!(PraxisError::Cancelled.is_cancelled());
    assert!(!PraxisError::Cancelled.is_network());
}

#[test]
fn network_is_not_classified_as_cancelled() {
    let err: PraxisError = SyncError::NetworkError {
        reason: "dns".into(),
    }
    .into();
    assert!(!err.is_cancelled());
    assert!(err.is_network());
}
