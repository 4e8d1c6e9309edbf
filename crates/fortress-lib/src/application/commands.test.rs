use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

const LAYERED: &str = r#"
[[component]]
name = "web"
requires = ["datasource", "logger"]

[[component]]
name = "datasource"
requires = ["logger"]

[[component]]
name = "logger"
"#;

const CYCLIC: &str = r#"
[[component]]
name = "a"
requires = ["b"]

[[component]]
name = "b"
requires = ["a"]
"#;

fn write_manifest(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("components.toml");
    fs::write(&path, content).unwrap();
    path
}

fn run(command: Commands, config: &AppConfig) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_output(command, config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn json_config() -> AppConfig {
    AppConfig {
        output: OutputFormat::Json,
        ..AppConfig::default()
    }
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_reports_component_count() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    let output = run(Commands::Check { manifest }, &AppConfig::default()).unwrap();
    assert!(output.contains("3 components, no cycles"));
}

#[test]
fn test_check_fails_on_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, CYCLIC);

    let err = run(Commands::Check { manifest }, &AppConfig::default()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Cyclic dependency detected"));
    assert!(message.contains("a → b → a"));
}

#[test]
fn test_check_json_lists_external_components() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        &temp_dir,
        "[[component]]\nname = \"web\"\nrequires = [\"context\"]\n",
    );

    let output = run(Commands::Check { manifest }, &json_config()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["components"], 2);
    assert_eq!(report["external"][0], "context");
    assert_eq!(report["acyclic"], true);
}

#[test]
fn test_check_missing_manifest_has_context() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("absent.toml");

    let err = run(Commands::Check { manifest }, &AppConfig::default()).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

// ============================================================================
// order
// ============================================================================

#[test]
fn test_order_lists_startup_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    let output = run(
        Commands::Order {
            manifest,
            shutdown: false,
        },
        &AppConfig::default(),
    )
    .unwrap();

    assert!(output.contains("Component initialization order:"));
    assert!(output.contains("#1 (0) : logger"));
    assert!(output.contains("#2 (1) : datasource [ logger ]"));
    assert!(output.contains("#3 (2) : web [ datasource, logger ]"));
}

#[test]
fn test_order_shutdown_reverses_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    let output = run(
        Commands::Order {
            manifest,
            shutdown: true,
        },
        &AppConfig::default(),
    )
    .unwrap();

    assert!(output.contains("Component shutdown order:"));
    assert!(output.contains("#1 (2) : web"));
    assert!(output.contains("#3 (0) : logger"));
}

#[test]
fn test_order_json_is_an_array() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, LAYERED);

    let output = run(
        Commands::Order {
            manifest,
            shutdown: false,
        },
        &json_config(),
    )
    .unwrap();

    let sequence: serde_json::Value = serde_json::from_str(&output).unwrap();
    let names: Vec<&str> = sequence
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["logger", "datasource", "web"]);
    assert_eq!(sequence[2]["order"], 2);
}

// ============================================================================
// graph / version
// ============================================================================

#[test]
fn test_graph_renders_dot_even_with_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir, CYCLIC);

    let output = run(Commands::Graph { manifest }, &AppConfig::default()).unwrap();
    assert!(output.starts_with("digraph"));
    assert!(output.contains("0 -> 1"));
    assert!(output.contains("1 -> 0"));
    assert!(output.contains("\"a\""));
}

#[test]
fn test_version_prints_package_version() {
    let output = run(Commands::Version, &AppConfig::default()).unwrap();
    assert_eq!(output.trim(), format!("fortress {}", env!("CARGO_PKG_VERSION")));
}
