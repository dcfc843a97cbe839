use neurocinema::config::AppConfig;
use neurocinema::error;
use neurocinema::CinemaError;
use std::error::Error;
use std::time::Duration;

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&CinemaError::ConfigError("bad delay".into()));
    assert!(msg.contains("bad delay"));
    assert!(msg.contains("settings file"));

    let msg = error::user_friendly_message(&CinemaError::TuiError("no tty".into()));
    assert!(msg.contains("--prompt"));

    let io = CinemaError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(error::user_friendly_message(&io).contains("gone"));
}

#[test]
fn test_io_error_keeps_source() {
    let err = CinemaError::from(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"));
    assert!(err.source().is_some());
    assert!(CinemaError::TaskError("x".into()).source().is_none());
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neurocinema.toml");
    std::fs::write(&path, "estimate_delay = \"soon\"\n").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, CinemaError::ConfigError(_)));
}

#[test]
fn test_out_of_range_config_is_rejected_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neurocinema.toml");
    let config = AppConfig::default().with_estimate_delay(Duration::from_secs(600));

    assert!(config.save_to(&path).is_err());
    assert!(!path.exists());
}
