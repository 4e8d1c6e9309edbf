use super::*;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_verbosity_above_trace() {
    let config = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_logger_config_follows_app_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Yaml,
        log_output: LogOutput::Stdout,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Yaml);
    assert_eq!(logger_config.output, LogOutput::Stdout);
    assert!(!logger_config.color);
}

#[test]
fn test_explicit_color_intent_ignores_terminal() {
    let always = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    assert!(always.color_enabled());

    let never = AppConfig {
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    assert!(!never.color_enabled());
}

#[test]
fn test_deserialize_fills_defaults() {
    let config: AppConfig = serde_json::from_str(r#"{ "output": "json" }"#).unwrap();
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
}
