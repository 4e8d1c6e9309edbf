use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_env_file_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    assert!(AppConfig::load_env_file(&temp_dir.path().join(".env")).is_ok());
}

#[test]
fn test_malformed_env_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "FORTRESS_TEST_BROKEN='unterminated\n").unwrap();

    let err = AppConfig::load_env_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::EnvFileError { .. }));
}

#[test]
fn test_env_file_values_are_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "FORTRESS_LOADER_TEST_VALUE=loaded\n").unwrap();

    AppConfig::load_env_file(&path).unwrap();
    assert_eq!(
        std::env::var("FORTRESS_LOADER_TEST_VALUE").as_deref(),
        Ok("loaded")
    );
}

#[test]
fn test_finish_applies_environment_to_auto_color() {
    let config = CliConfig::from_args(["fortress"]).unwrap();
    let environment = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let finished = config.finish(&environment).unwrap();
    assert_eq!(finished.app_config.color, ColorIntent::Never);
}

#[test]
fn test_finish_keeps_explicit_color() {
    let config = CliConfig::from_args(["fortress", "--color", "always"]).unwrap();
    let environment = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let finished = config.finish(&environment).unwrap();
    assert_eq!(finished.app_config.color, ColorIntent::Always);
}

#[test]
fn test_finish_validates() {
    let config = CliConfig::from_args(["fortress", "--log-level", "7"]).unwrap();
    let err = config.finish(&EnvironmentConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}
