// Config loading and validation tests

use syswatch::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 5000
host = "0.0.0.0"

[recording]
duration_limit_secs = 300
sample_interval_ms = 1000
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.recording.duration_limit_secs, 300);
    assert_eq!(config.recording.sample_interval_ms, 1000);
}

#[test]
fn test_config_recording_defaults_apply() {
    let minimal = r#"
[server]
port = 5000
host = "127.0.0.1"

[recording]
"#;
    let config = AppConfig::load_from_str(minimal).expect("load_from_str");
    assert_eq!(config.recording.duration_limit_secs, 300);
    assert_eq!(config.recording.sample_interval_ms, 1000);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 5000", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_duration_limit_zero() {
    let bad = VALID_CONFIG.replace("duration_limit_secs = 300", "duration_limit_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("duration_limit_secs"));
}

#[test]
fn test_config_validation_rejects_sample_interval_zero() {
    let bad = VALID_CONFIG.replace("sample_interval_ms = 1000", "sample_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("sample_interval_ms"));
}
