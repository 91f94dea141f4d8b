use praxis_core::config::{defaults, PraxisConfig};

#[test]
fn empty_toml_yields_full_defaults() {
    let config = PraxisConfig::from_toml_str("").unwrap();
    assert_eq!(config.sync.endpoint, defaults::DEFAULT_ENDPOINT);
    assert_eq!(config.sync.push_batch_size, defaults::DEFAULT_PUSH_BATCH_SIZE);
    assert_eq!(
        config.exam.tick_interval_secs,
        defaults::DEFAULT_TICK_INTERVAL_SECS
    );
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let raw = r#"
        [sync]
        endpoint = "https://exams.example.edu"

        [exam]
        tick_interval_secs = 1
    "#;
    let config = PraxisConfig::from_toml_str(raw).unwrap();
    assert_eq!(config.sync.endpoint, "https://exams.example.edu");
    assert_eq!(config.exam.tick_interval_secs, 1);
    // Untouched fields keep defaults.
    assert_eq!(
        config.sync.request_timeout_secs,
        defaults::DEFAULT_REQUEST_TIMEOUT_SECS
    );
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(PraxisConfig::from_toml_str("[sync").is_err());
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("praxis.toml");
    std::fs::write(&path, "[store]\ndata_dir = \"/tmp/praxis\"\n").unwrap();

    let config = PraxisConfig::load(&path).unwrap();
    assert_eq!(config.store.data_dir, std::path::PathBuf::from("/tmp/praxis"));
}

#[test]
fn missing_config_file_is_a_storage_error() {
    let err = PraxisConfig::load(std::path::Path::new("/nonexistent/praxis.toml")).unwrap_err();
    assert!(matches!(
        err,
        praxis_core::errors::PraxisError::StorageError(_)
    ));
}
