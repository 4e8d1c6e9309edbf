// Tests for manifest loading

use super::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[component]]
name = "logger"

[[component]]
name = "datasource"
role = "org.example.DataSource"
requires = ["logger"]

[[component]]
name = "web"
requires = ["datasource", "logger"]
"#;

#[test]
fn test_parse_components_in_declaration_order() {
    let manifest = ComponentManifest::from_toml_str(MANIFEST, Path::new("inline")).unwrap();

    assert_eq!(manifest.len(), 3);
    let names: Vec<&str> = manifest.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["logger", "datasource", "web"]);

    assert_eq!(manifest.components[0].role, None);
    assert!(manifest.components[0].requires.is_empty());
    assert_eq!(
        manifest.components[1].role.as_deref(),
        Some("org.example.DataSource")
    );
    assert_eq!(manifest.components[2].requires, vec!["datasource", "logger"]);
}

#[test]
fn test_empty_document_has_no_components() {
    let manifest = ComponentManifest::from_toml_str("", Path::new("empty")).unwrap();
    assert!(manifest.is_empty());
}

#[test]
fn test_invalid_toml_reports_origin() {
    let err = ComponentManifest::from_toml_str("[[component]\nname=", Path::new("broken.toml"))
        .unwrap_err();
    assert!(matches!(err, ManifestError::TomlParseError { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_missing_name_is_a_parse_error() {
    let err = ComponentManifest::from_toml_str("[[component]]\nrequires = []\n", Path::new("x"))
        .unwrap_err();
    assert!(matches!(err, ManifestError::TomlParseError { .. }));
}

#[test]
fn test_blank_name_is_rejected() {
    let err = ComponentManifest::from_toml_str(
        "[[component]]\nname = \"a\"\n\n[[component]]\nname = \"  \"\n",
        Path::new("blank.toml"),
    )
    .unwrap_err();
    assert!(matches!(err, ManifestError::EmptyName { position: 2, .. }));
}

#[test]
fn test_blank_requirement_is_rejected() {
    let err = ComponentManifest::from_toml_str(
        "[[component]]\nname = \"a\"\nrequires = [\"\"]\n",
        Path::new("blank.toml"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ManifestError::EmptyRequirement { ref component, .. } if component == "a"
    ));
}

#[test]
fn test_from_path_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("components.toml");
    fs::write(&path, MANIFEST).unwrap();

    let manifest = ComponentManifest::from_path(&path).unwrap();
    assert_eq!(manifest.len(), 3);
}

#[test]
fn test_from_path_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = ComponentManifest::from_path(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ManifestError::FileReadError { .. }));
}

#[test]
fn test_builder_helpers() {
    let spec = ComponentSpec::new("web")
        .with_role("http")
        .requiring(["db", "cache"]);
    assert_eq!(spec.role.as_deref(), Some("http"));
    assert_eq!(spec.requires, vec!["db", "cache"]);
}
