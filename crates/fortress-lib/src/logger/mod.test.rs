use super::*;

#[test]
fn test_filter_directives_scope_fortress_crates() {
    let filter = Logger::filter_directives(LogLevel::Debug);
    assert_eq!(filter, "fortress=debug,fortress_lib=debug,warn");
    assert!(EnvFilter::try_new(&filter).is_ok());
}

#[test]
fn test_init_once() {
    let config = LoggerConfig {
        level: LogLevel::Trace,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        color: false,
    };

    // Another test binary component may already own the global subscriber
    if let Err(e) = Logger::init(config.clone()) {
        assert!(matches!(
            e,
            LoggerError::AlreadyInitialized | LoggerError::InitializationFailed { .. }
        ));
    }

    assert!(matches!(
        Logger::init(config),
        Err(LoggerError::AlreadyInitialized) | Err(LoggerError::InitializationFailed { .. })
    ));
}
