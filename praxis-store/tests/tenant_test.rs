//! TenantManager tests: lazy open, isolation, logout reset.

use praxis_core::config::StoreConfig;
use praxis_core::traits::{Collection, ITenantStorage};
use praxis_store::TenantManager;
use serde_json::json;

fn manager(dir: &tempfile::TempDir) -> TenantManager {
    TenantManager::new(&StoreConfig {
        data_dir: dir.path().to_path_buf(),
    })
}

#[test]
fn stores_open_lazily_and_are_cached() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);
    assert_eq!(manager.open_count(), 0);

    let a = manager.open("school-a").unwrap();
    let b = manager.open("school-a").unwrap();
    assert_eq!(manager.open_count(), 1);

    // Both handles hit the same database.
    a.put(Collection::Session, "s", &json!({"v": 1})).unwrap();
    assert!(b.get(Collection::Session, "s").unwrap().is_some());
}

#[test]
fn tenants_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    let a = manager.open("school-a").unwrap();
    let b = manager.open("school-b").unwrap();

    a.put(Collection::Schedules, "sched-1", &json!({"title": "A"}))
        .unwrap();
    assert!(b.get(Collection::Schedules, "sched-1").unwrap().is_none());
}

#[test]
fn reset_wipes_tenant_data() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    let store = manager.open("school-a").unwrap();
    store
        .put(Collection::Questions, "q1", &json!({"bank_id": "bank-1"}))
        .unwrap();
    store.kv_put("stu-1", "active_exam", &json!({})).unwrap();
    drop(store);

    manager.reset("school-a").unwrap();

    let reopened = manager.open("school-a").unwrap();
    assert!(reopened.get(Collection::Questions, "q1").unwrap().is_none());
    assert!(reopened.kv_get("stu-1", "active_exam").unwrap().is_none());
}

#[test]
fn reset_of_unknown_tenant_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);
    manager.reset("never-opened").unwrap();
}
