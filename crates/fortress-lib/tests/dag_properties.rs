//! Property tests for the dependency graph verifier
//!
//! Random DAGs are generated by only adding edges from later-created to
//! earlier-created vertices; cyclic graphs add one edge going the other way
//! along an existing path.

use fortress_lib::dag::{DependencyGraph, GraphVerifier, VertexId};
use proptest::prelude::*;

fn build(count: usize, edges: &[(usize, usize)]) -> (DependencyGraph<usize>, Vec<VertexId>) {
    let mut graph = DependencyGraph::new();
    let ids: Vec<VertexId> = (0..count)
        .map(|i| graph.add_vertex(format!("v{}", i), i))
        .collect();
    for (from, to) in edges {
        graph.add_dependency(ids[*from], ids[*to]).unwrap();
    }
    (graph, ids)
}

/// Edges that only point from a later vertex to an earlier one
fn dag_edges(count: usize, raw: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    raw.into_iter()
        .map(|(a, b)| (a % count, b % count))
        .filter(|(a, b)| a > b)
        .collect()
}

fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..40).prop_flat_map(|count| {
        (
            Just(count),
            prop::collection::vec((0..count, 0..count), 0..120)
                .prop_map(move |raw| dag_edges(count, raw)),
        )
    })
}

proptest! {
    #[test]
    fn random_dags_verify_and_respect_edges((count, edges) in dag_strategy()) {
        let (mut graph, ids) = build(count, &edges);
        let orders = GraphVerifier::verify(&mut graph, &ids).unwrap();

        for (from, to) in &edges {
            prop_assert!(orders.get(ids[*to]) < orders.get(ids[*from]));
        }
    }

    #[test]
    fn random_dags_sort_dependencies_first(
        (count, edges) in dag_strategy(),
        seed in any::<u64>(),
    ) {
        let (mut graph, ids) = build(count, &edges);
        let mut vertices = ids.clone();
        // Deterministic permutation of the input
        vertices.sort_by_key(|v| (v.index() as u64).wrapping_mul(seed | 1).rotate_left(17));

        GraphVerifier::topological_sort(&mut graph, &mut vertices).unwrap();

        for (position, vertex) in vertices.iter().enumerate() {
            for dep in graph.dependencies(*vertex) {
                let dep_position = vertices.iter().position(|v| *v == dep).unwrap();
                prop_assert!(dep_position < position);
            }
        }
    }

    #[test]
    fn closing_a_path_is_always_detected(
        (count, edges) in dag_strategy(),
        chain_start in 0usize..40,
        hops in 0usize..6,
    ) {
        let start = chain_start % count;
        let mut edges = edges;

        // Walk down from `start` towards vertex 0, then point back up
        let mut bottom = start;
        for _ in 0..hops {
            if bottom == 0 {
                break;
            }
            edges.push((bottom, bottom - 1));
            bottom -= 1;
        }
        edges.push((bottom, start));

        let (mut graph, ids) = build(count, &edges);
        let err = GraphVerifier::verify(&mut graph, &ids).unwrap_err();
        let cycle = err.as_cycle().expect("cycle error");
        prop_assert_eq!(cycle.path.first(), cycle.path.last());
    }

    #[test]
    fn reverification_keeps_orders((count, edges) in dag_strategy()) {
        let (mut graph, ids) = build(count, &edges);
        let first = GraphVerifier::verify(&mut graph, &ids).unwrap();
        let second = GraphVerifier::verify(&mut graph, &ids).unwrap();
        prop_assert_eq!(first, second);
    }
}
