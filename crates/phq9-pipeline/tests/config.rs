use std::time::Duration;

use phq9_pipeline::{ConfigError, Phq9Config};

#[test]
fn defaults_match_reference_retry_budget() {
    let config = Phq9Config::default();
    assert_eq!(config.retry_interval_secs, 10);
    assert_eq!(config.max_attempts, 30);

    let policy = config.retry_policy();
    assert_eq!(policy.interval, Duration::from_secs(10));
    assert_eq!(policy.max_attempts, 30);
}

#[test]
fn pre_versioned_config_is_migrated() {
    let config = Phq9Config::from_json(r#"{ "retry_interval_secs": 5 }"#).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.retry_interval_secs, 5);
    assert_eq!(config.max_attempts, 30);
}

#[test]
fn newer_config_version_is_rejected() {
    let err = Phq9Config::from_json(r#"{ "config_version": 7 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnsupportedVersion { found: 7, supported: 1 }
    ));
}

#[test]
fn non_object_config_is_rejected() {
    let err = Phq9Config::from_json("[1, 2]").unwrap_err();
    assert!(matches!(err, ConfigError::NotAnObject));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phq9").join("config.json");

    let config = Phq9Config {
        config_version: 0,
        retry_interval_secs: 2,
        max_attempts: 4,
    };
    config.save(&path).unwrap();

    let loaded = Phq9Config::load(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.retry_interval_secs, 2);
    assert_eq!(loaded.max_attempts, 4);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Phq9Config::load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Phq9Config::default());
    assert!(matches!(
        Phq9Config::load(&dir.path().join("absent.json")),
        Err(ConfigError::Read { .. })
    ));
}
