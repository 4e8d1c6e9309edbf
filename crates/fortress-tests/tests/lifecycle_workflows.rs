//! E2E tests for the check/order/graph workflow
//!
//! These tests write real manifests (tempfile) and drive the command layer
//! the same way the binary does, capturing its output.

use anyhow::Result;
use fortress_lib::application::cli::Commands;
use fortress_lib::application::config::AppConfig;
use fortress_lib::primitives::OutputFormat;
use fortress_lib::{ContainerError, LifecyclePlan};
use fortress_tests::{ManifestBuilder, ManifestWorkspace};

fn json() -> AppConfig {
    AppConfig {
        output: OutputFormat::Json,
        ..AppConfig::default()
    }
}

fn startup_names(output: &str) -> Result<Vec<String>> {
    let sequence: serde_json::Value = serde_json::from_str(output)?;
    Ok(sequence
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|c| c["name"].as_str().map(str::to_string))
        .collect())
}

#[test]
fn test_container_workflow_check_then_order() -> Result<()> {
    let workspace = ManifestWorkspace::new(
        &ManifestBuilder::new()
            .component_with_role("web", "http", &["sessions", "datasource"])
            .component("sessions", &["cache"])
            .component("datasource", &["pool", "logger"])
            .component("cache", &["logger"])
            .component("pool", &[])
            .component("logger", &[])
            .build(),
    )?;

    let check = workspace.run(&AppConfig::default(), |manifest| Commands::Check { manifest })?;
    assert!(check.contains("6 components, no cycles"));

    let order = workspace.run(&json(), |manifest| Commands::Order {
        manifest,
        shutdown: false,
    })?;
    // Equal orders keep first-mention order: datasource is named by web before cache exists
    assert_eq!(
        startup_names(&order)?,
        vec!["pool", "logger", "datasource", "cache", "sessions", "web"]
    );

    let shutdown = workspace.run(&json(), |manifest| Commands::Order {
        manifest,
        shutdown: true,
    })?;
    let mut reversed = startup_names(&order)?;
    reversed.reverse();
    assert_eq!(startup_names(&shutdown)?, reversed);
    Ok(())
}

#[test]
fn test_cycle_is_reported_with_full_path() -> Result<()> {
    let workspace = ManifestWorkspace::new(
        &ManifestBuilder::new()
            .component("root", &["child1", "child2"])
            .component("child1", &[])
            .component("child2", &["child3"])
            .component("child3", &["child4"])
            .component("child4", &["child5"])
            .component("child5", &["child3"])
            .build(),
    )?;

    let err = workspace
        .run(&AppConfig::default(), |manifest| Commands::Check { manifest })
        .unwrap_err();
    let container_err = err.downcast_ref::<ContainerError>().unwrap();
    assert_eq!(
        container_err.cycle_path().unwrap(),
        &["child3", "child4", "child5", "child3"]
    );
    Ok(())
}

#[test]
fn test_graph_output_lists_every_component() -> Result<()> {
    let workspace = ManifestWorkspace::new(
        &ManifestBuilder::new()
            .component("web", &["db"])
            .component("db", &[])
            .build(),
    )?;

    let dot = workspace.run(&AppConfig::default(), |manifest| Commands::Graph { manifest })?;
    assert!(dot.contains("\"web\""));
    assert!(dot.contains("\"db\""));
    assert!(dot.contains("0 -> 1"));
    Ok(())
}

#[test]
fn test_plan_from_path_matches_command_output() -> Result<()> {
    let workspace = ManifestWorkspace::new(
        &ManifestBuilder::new()
            .component("a", &["b", "external"])
            .component("b", &[])
            .build(),
    )?;

    let plan = LifecyclePlan::from_path(workspace.manifest())?;
    let names: Vec<&str> = plan.startup().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["b", "external", "a"]);
    assert!(plan.get("external").unwrap().external);

    let order = workspace.run(&json(), |manifest| Commands::Order {
        manifest,
        shutdown: false,
    })?;
    assert_eq!(startup_names(&order)?, vec!["b", "external", "a"]);
    Ok(())
}

#[test]
fn test_manifest_builder_output_parses() -> Result<()> {
    let content = ManifestBuilder::new()
        .component_with_role("web", "http", &["db", "cache"])
        .component("db", &[])
        .build();

    let manifest = fortress_lib::ComponentManifest::from_toml_str(
        &content,
        std::path::Path::new("builder.toml"),
    )?;
    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.components[0].role.as_deref(), Some("http"));
    assert_eq!(manifest.components[0].requires, vec!["db", "cache"]);
    assert!(manifest.components[1].requires.is_empty());
    Ok(())
}
