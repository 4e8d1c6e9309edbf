use super::*;
use crate::primitives::{ColorIntent, OutputFormat};
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_command() {
    let config = CliConfig::from_args(["fortress"]).unwrap();
    assert!(config.command.is_none());
    assert_eq!(config.app_config.output, OutputFormat::Text);
}

#[test]
fn test_order_with_shutdown_flag() {
    let config = CliConfig::from_args(["fortress", "order", "components.toml", "--shutdown"]).unwrap();
    assert_eq!(
        config.command,
        Some(Commands::Order {
            manifest: PathBuf::from("components.toml"),
            shutdown: true,
        })
    );
}

#[test]
fn test_global_options_after_subcommand() {
    let config =
        CliConfig::from_args(["fortress", "check", "c.toml", "--output", "json", "--color", "off"])
            .unwrap();
    assert_eq!(config.app_config.output, OutputFormat::Json);
    assert_eq!(config.app_config.color, ColorIntent::Never);
    assert_eq!(
        config.command.as_ref().and_then(Commands::manifest),
        Some(&PathBuf::from("c.toml"))
    );
}

#[test]
fn test_missing_manifest_is_an_error() {
    let err = CliConfig::from_args(["fortress", "graph"]).unwrap_err();
    assert!(matches!(err, ConfigError::ArgumentParsingFailed { .. }));
}

#[test]
fn test_version_has_no_manifest() {
    let config = CliConfig::from_args(["fortress", "version"]).unwrap();
    assert_eq!(config.command.as_ref().and_then(Commands::manifest), None);
}
