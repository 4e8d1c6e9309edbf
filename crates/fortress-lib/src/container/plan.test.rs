// Tests for lifecycle planning

use super::*;
use crate::container::manifest::ComponentSpec;

// ============================================================================
// Test Utilities
// ============================================================================

fn manifest(components: Vec<ComponentSpec>) -> ComponentManifest {
    ComponentManifest::new(components)
}

fn names<'a>(components: impl Iterator<Item = &'a PlannedComponent>) -> Vec<&'a str> {
    components.map(|c| c.name.as_str()).collect()
}

fn position(plan: &LifecyclePlan, name: &str) -> usize {
    plan.startup().iter().position(|c| c.name == name).unwrap()
}

/// Every component starts after everything it requires
fn assert_startup_respects_requirements(plan: &LifecyclePlan) {
    for component in plan.startup() {
        for required in &component.requires {
            assert!(
                position(plan, required) < position(plan, &component.name),
                "{} should start before {}",
                required,
                component.name
            );
        }
    }
}

// ============================================================================
// Planning
// ============================================================================

#[test]
fn test_plan_orders_dependencies_first() {
    let plan = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("web").requiring(["datasource", "logger"]),
        ComponentSpec::new("datasource").requiring(["logger"]),
        ComponentSpec::new("logger"),
    ]))
    .unwrap();

    assert_eq!(names(plan.startup().iter()), vec!["logger", "datasource", "web"]);
    assert_eq!(plan.get("logger").unwrap().order, 0);
    assert_eq!(plan.get("datasource").unwrap().order, 1);
    assert_eq!(plan.get("web").unwrap().order, 2);
    assert_startup_respects_requirements(&plan);
}

#[test]
fn test_shutdown_is_reverse_of_startup() {
    let plan = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("a").requiring(["b", "c"]),
        ComponentSpec::new("b"),
        ComponentSpec::new("c").requiring(["d"]),
        ComponentSpec::new("d"),
        ComponentSpec::new("e").requiring(["b", "d"]),
    ]))
    .unwrap();

    let mut startup = names(plan.startup().iter());
    startup.reverse();
    assert_eq!(names(plan.shutdown()), startup);
    assert_startup_respects_requirements(&plan);
}

#[test]
fn test_independent_components_keep_declaration_order() {
    let plan = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("zeta"),
        ComponentSpec::new("alpha"),
        ComponentSpec::new("mid"),
    ]))
    .unwrap();

    assert_eq!(names(plan.startup().iter()), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_undeclared_requirement_becomes_external() {
    let plan = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("web").requiring(["container-context"]),
    ]))
    .unwrap();

    assert_eq!(plan.len(), 2);
    let external: Vec<&str> = names(plan.external());
    assert_eq!(external, vec!["container-context"]);
    assert!(!plan.get("web").unwrap().external);
}

#[test]
fn test_late_declaration_clears_external_flag() {
    let plan = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("web").requiring(["db"]),
        ComponentSpec::new("db").with_role("sql"),
    ]))
    .unwrap();

    let db = plan.get("db").unwrap();
    assert!(!db.external);
    assert_eq!(db.role.as_deref(), Some("sql"));
    assert_eq!(plan.external().count(), 0);
}

#[test]
fn test_duplicate_declarations_merge() {
    let graph = LifecyclePlan::build_graph(&manifest(vec![
        ComponentSpec::new("web").requiring(["db"]),
        ComponentSpec::new("db"),
        ComponentSpec::new("web").with_role("http").requiring(["cache", "db"]),
        ComponentSpec::new("cache"),
    ]))
    .unwrap();

    assert_eq!(graph.len(), 3);
    let web = graph.find("web").unwrap();
    assert_eq!(graph.dependency_names(web), vec!["db", "cache"]);
    assert_eq!(graph.vertex(web).unwrap().node().role.as_deref(), Some("http"));
}

#[test]
fn test_cycle_fails_planning_with_component_names() {
    let err = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("a").requiring(["b"]),
        ComponentSpec::new("b").requiring(["c"]),
        ComponentSpec::new("c").requiring(["a"]),
    ]))
    .unwrap_err();

    assert_eq!(err.cycle_path().unwrap(), &["a", "b", "c", "a"]);
    assert!(err.to_string().contains("a → b → c → a"));
}

#[test]
fn test_self_requirement_is_a_cycle() {
    let err = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("a").requiring(["a"]),
    ]))
    .unwrap_err();
    assert_eq!(err.cycle_path().unwrap(), &["a", "a"]);
}

#[test]
fn test_empty_manifest_gives_empty_plan() {
    let plan = LifecyclePlan::from_manifest(&ComponentManifest::default()).unwrap();
    assert!(plan.is_empty());
    assert_eq!(plan.shutdown().count(), 0);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_describe_lists_requirements_above_order_zero() {
    let root = PlannedComponent {
        name: "logger".to_string(),
        order: 0,
        role: None,
        requires: vec![],
        external: false,
    };
    assert_eq!(root.describe(1), "#1 (0) : logger");

    let web = PlannedComponent {
        name: "web".to_string(),
        order: 2,
        role: None,
        requires: vec!["datasource".to_string(), "logger".to_string()],
        external: false,
    };
    assert_eq!(web.describe(3), "#3 (2) : web [ datasource, logger ]");
}

#[test]
fn test_plan_serializes_startup_sequence() {
    let plan = LifecyclePlan::from_manifest(&manifest(vec![
        ComponentSpec::new("web").with_role("http").requiring(["db"]),
        ComponentSpec::new("db"),
    ]))
    .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["startup"][0]["name"], "db");
    assert_eq!(json["startup"][1]["role"], "http");
    assert_eq!(json["startup"][1]["requires"][0], "db");
    assert!(json["startup"][0].get("role").is_none());

    // Logging must not disturb the plan
    plan.log_startup();
    plan.log_shutdown();
}
