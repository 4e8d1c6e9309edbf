// Tests for the vertex arena

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn graph_with(names: &[&str]) -> (DependencyGraph<()>, Vec<VertexId>) {
    let mut graph = DependencyGraph::new();
    let ids = names.iter().map(|name| graph.add_vertex(*name, ())).collect();
    (graph, ids)
}

// ============================================================================
// Basic Graph Operations
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph: DependencyGraph<()> = DependencyGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.len(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_new_vertex_starts_at_order_zero() {
    let mut graph = DependencyGraph::new();
    let id = graph.add_vertex("logger", 42u32);

    let vertex = graph.vertex(id).unwrap();
    assert_eq!(vertex.name(), "logger");
    assert_eq!(*vertex.node(), 42);
    assert_eq!(vertex.order(), 0);
    assert_eq!(vertex.to_string(), "logger");
}

#[test]
fn test_same_label_is_a_distinct_vertex() {
    let (graph, ids) = graph_with(&["store", "store"]);

    assert_ne!(ids[0], ids[1]);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.find("store"), Some(ids[0]));
}

#[test]
fn test_dependencies_keep_insertion_order() {
    let (mut graph, ids) = graph_with(&["root", "a", "b", "c"]);
    graph.add_dependency(ids[0], ids[2]).unwrap();
    graph.add_dependency(ids[0], ids[1]).unwrap();
    graph.add_dependency(ids[0], ids[3]).unwrap();

    assert_eq!(graph.dependencies(ids[0]), vec![ids[2], ids[1], ids[3]]);
    assert_eq!(graph.dependency_names(ids[0]), vec!["b", "a", "c"]);
    assert!(graph.dependencies(ids[1]).is_empty());
}

#[test]
fn test_duplicate_dependency_is_kept_once() {
    let (mut graph, ids) = graph_with(&["root", "child"]);
    graph.add_dependency(ids[0], ids[1]).unwrap();
    graph.add_dependency(ids[0], ids[1]).unwrap();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.dependencies(ids[0]), vec![ids[1]]);
}

#[test]
fn test_add_dependency_to_unknown_vertex_fails() {
    let (mut graph, ids) = graph_with(&["root"]);
    let (_, foreign) = graph_with(&["x", "y", "z"]);

    let err = graph.add_dependency(ids[0], foreign[2]).unwrap_err();
    assert_eq!(err, DagError::VertexNotFound { index: 2 });
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_self_dependency_is_accepted_at_add_time() {
    let (mut graph, ids) = graph_with(&["loop"]);
    graph.add_dependency(ids[0], ids[0]).unwrap();
    assert_eq!(graph.dependencies(ids[0]), vec![ids[0]]);
}

// ============================================================================
// Order Resolution
// ============================================================================

#[test]
fn test_resolve_order_without_dependencies_is_zero() {
    let (mut graph, ids) = graph_with(&["leaf"]);
    assert_eq!(graph.resolve_order(ids[0]).unwrap(), 0);
}

#[test]
fn test_resolve_order_is_one_more_than_deepest_dependency() {
    // root -> a -> b, root -> c
    let (mut graph, ids) = graph_with(&["root", "a", "b", "c"]);
    graph.add_dependency(ids[0], ids[1]).unwrap();
    graph.add_dependency(ids[1], ids[2]).unwrap();
    graph.add_dependency(ids[0], ids[3]).unwrap();

    assert_eq!(graph.resolve_order(ids[0]).unwrap(), 2);
    assert_eq!(graph.order(ids[1]), Some(1));
    assert_eq!(graph.order(ids[2]), Some(0));
    assert_eq!(graph.order(ids[3]), Some(0));
}

#[test]
fn test_resolve_order_reports_self_loop() {
    let (mut graph, ids) = graph_with(&["loop"]);
    graph.add_dependency(ids[0], ids[0]).unwrap();

    let err = graph.resolve_order(ids[0]).unwrap_err();
    let cycle = err.as_cycle().expect("self-loop is a cycle");
    assert_eq!(cycle.path, vec!["loop", "loop"]);
    assert_eq!(cycle.participants(), &[ids[0]]);
}

#[test]
fn test_reset_clears_order() {
    let (mut graph, ids) = graph_with(&["root", "child"]);
    graph.add_dependency(ids[0], ids[1]).unwrap();
    graph.resolve_order(ids[0]).unwrap();
    assert_eq!(graph.order(ids[0]), Some(1));

    graph.reset(ids[0]);
    assert_eq!(graph.order(ids[0]), Some(0));

    graph.resolve_order(ids[0]).unwrap();
    graph.reset_all();
    assert!(graph.vertices().all(|(_, vertex)| vertex.order() == 0));
}

#[test]
fn test_cmp_order_follows_resolved_order() {
    let (mut graph, ids) = graph_with(&["root", "child"]);
    graph.add_dependency(ids[0], ids[1]).unwrap();
    graph.resolve_order(ids[0]).unwrap();

    let root = graph.vertex(ids[0]).unwrap();
    let child = graph.vertex(ids[1]).unwrap();
    assert_eq!(child.cmp_order(root), std::cmp::Ordering::Less);
}

// ============================================================================
// Closure and Rendering
// ============================================================================

#[test]
fn test_transitive_closure_includes_each_vertex_once() {
    // Diamond: top -> {left, right} -> bottom, plus an unrelated vertex
    let (mut graph, ids) = graph_with(&["top", "left", "right", "bottom", "unrelated"]);
    graph.add_dependency(ids[0], ids[1]).unwrap();
    graph.add_dependency(ids[0], ids[2]).unwrap();
    graph.add_dependency(ids[1], ids[3]).unwrap();
    graph.add_dependency(ids[2], ids[3]).unwrap();

    let closure = graph.transitive_closure(ids[0]).unwrap();
    assert_eq!(closure.len(), 4);
    assert_eq!(closure[0], ids[0]);
    assert!(!closure.contains(&ids[4]));
}

#[test]
fn test_to_dot_names_vertices() {
    let (mut graph, ids) = graph_with(&["web", "db"]);
    graph.add_dependency(ids[0], ids[1]).unwrap();

    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("web"));
    assert!(dot.contains("db"));
    assert!(dot.contains("0 -> 1"));
}
