// Tests for graph verification and topological sorting

use super::*;
use crate::dag::{DagError, DependencyGraph, VertexId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

// ============================================================================
// Test Utilities
// ============================================================================

fn components(count: usize) -> (DependencyGraph<()>, Vec<VertexId>) {
    let mut graph = DependencyGraph::new();
    let ids = (1..=count)
        .map(|i| graph.add_vertex(format!("Component{}", i), ()))
        .collect();
    (graph, ids)
}

/// The diamond from the container tests: C1 -> {C2, C3}, C3 -> C4, C5 -> {C2, C4}
fn diamond() -> (DependencyGraph<()>, Vec<VertexId>) {
    let (mut graph, c) = components(5);
    graph.add_dependency(c[0], c[1]).unwrap();
    graph.add_dependency(c[0], c[2]).unwrap();
    graph.add_dependency(c[2], c[3]).unwrap();
    graph.add_dependency(c[4], c[1]).unwrap();
    graph.add_dependency(c[4], c[3]).unwrap();
    (graph, c)
}

/// Every direct dependency has a strictly lower order than its dependent
fn assert_graph_orders(graph: &DependencyGraph<()>, vertices: &[VertexId]) {
    for vertex in vertices {
        for dep in graph.dependencies(*vertex) {
            assert!(
                graph.order(dep) < graph.order(*vertex),
                "The order of {} ({:?}) should be less than the order of {} ({:?})",
                graph.name(dep),
                graph.order(dep),
                graph.name(*vertex),
                graph.order(*vertex)
            );
        }
    }
}

/// Orders never decrease along the list and dependencies come first
fn assert_list_order(graph: &DependencyGraph<()>, vertices: &[VertexId]) {
    for pair in vertices.windows(2) {
        assert!(graph.order(pair[0]) <= graph.order(pair[1]));
    }
    for (position, vertex) in vertices.iter().enumerate() {
        for dep in graph.dependencies(*vertex) {
            let dep_position = vertices.iter().position(|v| *v == dep).unwrap();
            assert!(
                dep_position < position,
                "{} should be sorted before {}",
                graph.name(dep),
                graph.name(*vertex)
            );
        }
    }
}

fn position(vertices: &[VertexId], vertex: VertexId) -> usize {
    vertices.iter().position(|v| *v == vertex).unwrap()
}

// ============================================================================
// Verification
// ============================================================================

#[test]
fn test_root_with_two_children_is_a_dag() {
    let mut graph = DependencyGraph::new();
    let root = graph.add_vertex("Root", ());
    let child1 = graph.add_vertex("Child1", ());
    let child2 = graph.add_vertex("Child2", ());
    graph.add_dependency(root, child1).unwrap();
    graph.add_dependency(root, child2).unwrap();

    let orders = GraphVerifier::verify_root(&mut graph, root).unwrap();

    assert_eq!(orders.len(), 3);
    assert_eq!(orders.get(child1), Some(0));
    assert_eq!(orders.get(child2), Some(0));
    assert_eq!(orders.get(root), Some(1));
    assert_eq!(graph.order(root), Some(1));
}

#[test]
fn test_root_cycle_through_third_child_is_detected() {
    let mut graph = DependencyGraph::new();
    let root = graph.add_vertex("Root", ());
    let child1 = graph.add_vertex("Child1", ());
    let child2 = graph.add_vertex("Child2", ());
    graph.add_dependency(root, child1).unwrap();
    graph.add_dependency(root, child2).unwrap();

    let child3 = graph.add_vertex("Child3", ());
    graph.add_dependency(child3, root).unwrap();
    graph.add_dependency(root, child3).unwrap();

    let err = GraphVerifier::verify_root(&mut graph, root).unwrap_err();
    let cycle = err.as_cycle().expect("Incorrectly missed the cycle");

    assert_eq!(cycle.path.first(), cycle.path.last());
    assert!(cycle.path.contains(&"Root".to_string()));
    assert!(cycle.path.contains(&"Child3".to_string()));
    assert!(!cycle.path.contains(&"Child1".to_string()));
    assert_eq!(
        err.to_string(),
        "Cyclic dependency detected: Root → Child3 → Root"
    );
}

#[test]
fn test_self_loop_is_a_cycle() {
    let (mut graph, c) = components(2);
    graph.add_dependency(c[0], c[1]).unwrap();
    graph.add_dependency(c[1], c[1]).unwrap();

    let err = GraphVerifier::verify(&mut graph, &c).unwrap_err();
    let cycle = err.as_cycle().unwrap();
    assert_eq!(cycle.path, vec!["Component2", "Component2"]);
}

#[test]
fn test_cycle_starting_two_hops_in_is_detected() {
    let (mut graph, c) = components(5);
    graph.add_dependency(c[0], c[1]).unwrap();
    graph.add_dependency(c[1], c[2]).unwrap();
    graph.add_dependency(c[2], c[3]).unwrap();
    graph.add_dependency(c[3], c[4]).unwrap();
    graph.add_dependency(c[4], c[2]).unwrap(); // Cycle

    let mut vertices = c.clone();
    let err = GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap_err();
    let cycle = err.as_cycle().expect("Did not detect the expected cyclic dependency");

    // The cycle path starts at the re-entered vertex, not at the entry point
    assert_eq!(
        cycle.path,
        vec!["Component3", "Component4", "Component5", "Component3"]
    );
    assert_eq!(cycle.participants(), &[c[2], c[3], c[4]]);
    // Input untouched on failure
    assert_eq!(vertices, c);
}

#[test]
fn test_failed_verification_leaves_vertices_reset() {
    let (mut graph, c) = components(2);
    graph.add_dependency(c[0], c[1]).unwrap();
    GraphVerifier::verify(&mut graph, &c).unwrap();
    assert_eq!(graph.order(c[0]), Some(1));

    graph.add_dependency(c[1], c[0]).unwrap();
    assert!(GraphVerifier::verify(&mut graph, &c).unwrap_err().is_cycle());
    assert_eq!(graph.order(c[0]), Some(0));
    assert_eq!(graph.order(c[1]), Some(0));
}

#[test]
fn test_missing_vertex_is_not_a_cycle() {
    let (mut graph, c) = components(3);
    graph.add_dependency(c[0], c[1]).unwrap();
    graph.add_dependency(c[1], c[2]).unwrap();

    let err = GraphVerifier::verify(&mut graph, &c[..2]).unwrap_err();
    match err {
        DagError::MissingVertex(missing) => {
            assert_eq!(missing.vertex, "Component3");
            assert_eq!(missing.required_by, "Component2");
        }
        other => panic!("expected a missing vertex error, got {:?}", other),
    }
}

#[test]
fn test_missing_vertex_is_reported_before_any_reset() {
    let (mut graph, c) = components(3);
    graph.add_dependency(c[0], c[1]).unwrap();
    GraphVerifier::verify(&mut graph, &c[..2]).unwrap();
    assert_eq!(graph.order(c[0]), Some(1));

    graph.add_dependency(c[1], c[2]).unwrap();
    assert!(GraphVerifier::verify(&mut graph, &c[..2]).is_err());
    assert_eq!(graph.order(c[0]), Some(1));
}

#[test]
fn test_unknown_vertex_handle_is_rejected() {
    let (mut graph, _) = components(1);
    let (_, foreign) = components(4);

    let err = GraphVerifier::verify(&mut graph, &foreign[3..]).unwrap_err();
    assert_eq!(err, DagError::VertexNotFound { index: 3 });
}

#[test]
fn test_empty_collection_verifies() {
    let (mut graph, _) = components(3);
    let orders = GraphVerifier::verify(&mut graph, &[]).unwrap();
    assert!(orders.is_empty());
    assert_eq!(orders.max_order(), None);
}

#[test]
fn test_disconnected_vertices_all_order_zero() {
    let (mut graph, c) = components(4);
    let orders = GraphVerifier::verify(&mut graph, &c).unwrap();
    assert!(orders.iter().all(|(_, order)| order == 0));
}

#[test]
fn test_duplicate_edges_do_not_change_orders() {
    let (mut plain, c) = diamond();
    let expected = GraphVerifier::verify(&mut plain, &c).unwrap();

    let (mut doubled, d) = diamond();
    doubled.add_dependency(d[0], d[1]).unwrap();
    doubled.add_dependency(d[2], d[3]).unwrap();
    let actual = GraphVerifier::verify(&mut doubled, &d).unwrap();

    for (a, b) in c.iter().zip(&d) {
        assert_eq!(expected.get(*a), actual.get(*b));
    }
}

#[test]
fn test_long_chain_does_not_overflow_the_stack() {
    let (mut graph, c) = components(10_000);
    for pair in c.windows(2) {
        graph.add_dependency(pair[1], pair[0]).unwrap();
    }

    // Start from the far end so the first resolution walks the whole chain
    let mut from_tail = c.clone();
    from_tail.reverse();
    let orders = GraphVerifier::verify(&mut graph, &from_tail).unwrap();
    assert_eq!(orders.get(c[9_999]), Some(9_999));
    assert_eq!(orders.get(c[0]), Some(0));

    // Close the chain into one large cycle
    graph.add_dependency(c[0], c[9_999]).unwrap();
    let err = GraphVerifier::verify(&mut graph, &c).unwrap_err();
    assert_eq!(err.as_cycle().unwrap().participants().len(), 10_000);
}

#[test]
fn test_start_vertex_does_not_change_orders() {
    let (mut graph, c) = diamond();
    let forward = GraphVerifier::verify(&mut graph, &c).unwrap();

    let mut reversed = c.clone();
    reversed.reverse();
    let backward = GraphVerifier::verify(&mut graph, &reversed).unwrap();

    assert_eq!(forward, backward);
}

// ============================================================================
// Topological Sort
// ============================================================================

#[test]
fn test_sort_diamond() {
    let (mut graph, c) = diamond();
    let mut vertices = c.clone();

    GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap();
    assert_graph_orders(&graph, &vertices);
    assert_list_order(&graph, &vertices);

    for early in [c[1], c[3]] {
        for late in [c[0], c[2], c[4]] {
            assert!(position(&vertices, early) < position(&vertices, late));
        }
    }
    assert!(position(&vertices, c[2]) < position(&vertices, c[0]));
}

#[test]
fn test_sort_is_stable_for_ties() {
    let (mut graph, c) = diamond();
    let mut vertices = c.clone();
    GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap();

    // C2 and C4 both have order 0; C3 and C5 both have order 1
    assert_eq!(vertices, vec![c[1], c[3], c[2], c[4], c[0]]);
}

#[test]
fn test_sort_survives_shuffles_until_a_cycle_is_added() {
    let (mut graph, c) = diamond();
    let mut vertices = c.clone();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap();
    assert_graph_orders(&graph, &vertices);
    assert_list_order(&graph, &vertices);

    for _ in 0..20 {
        vertices.shuffle(&mut rng);
        GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap();
        assert_graph_orders(&graph, &vertices);
        assert_list_order(&graph, &vertices);
    }

    graph.add_dependency(c[3], c[0]).unwrap();
    vertices.shuffle(&mut rng);

    let err = GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap_err();
    assert!(err.is_cycle(), "Did not detect the expected cyclic dependency");
}

#[test]
fn test_reverification_is_idempotent() {
    let (mut graph, c) = diamond();
    let first = GraphVerifier::verify(&mut graph, &c).unwrap();
    let second = GraphVerifier::verify(&mut graph, &c).unwrap();
    assert_eq!(first, second);

    GraphVerifier::reset_vertices(&mut graph, &c);
    let third = GraphVerifier::verify(&mut graph, &c).unwrap();
    assert_eq!(first, third);
}

#[test]
fn test_orders_compare_dependencies_first() {
    let (mut graph, c) = diamond();
    let orders = GraphVerifier::verify(&mut graph, &c).unwrap();

    assert_eq!(orders.compare(c[3], c[2]), std::cmp::Ordering::Less);
    assert_eq!(orders.compare(c[1], c[3]), std::cmp::Ordering::Equal);
    assert_eq!(orders.max_order(), Some(2));
}

#[test]
fn test_topological_order_over_whole_graph() {
    let (mut graph, c) = diamond();
    let order = graph.topological_order().unwrap();
    assert_eq!(order.len(), c.len());
    assert_list_order(&graph, &order);
}
