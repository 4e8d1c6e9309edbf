//! Cycle detection and deterministic topological ordering
//!
//! Orders are computed as `1 + max(order of dependencies)`, resolved on
//! demand and memoized per vertex. Every edge is read once, either to descend
//! into an unresolved dependency or to read a finished order, so a pass costs
//! O(|V| + |E|). The value of a vertex depends only on its dependencies, so
//! the final orders do not depend on which vertex a pass starts from; only
//! the reported cycle path does.
//!
//! Resolution walks an explicit stack instead of recursing, so a chain of many
//! thousands of vertices cannot exhaust the call stack, and a cycle is read
//! straight off the stack when a dependency is found still in progress.

use super::error::{CyclicDependencyError, DagError};
use super::vertex::{DependencyGraph, VertexId};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Per-pass visitation state of one vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Resolved(usize),
}

/// A vertex whose dependencies are being walked
struct Frame {
    vertex: VertexId,
    dependencies: Vec<VertexId>,
    next: usize,
    order: usize,
}

impl Frame {
    fn enter<T>(graph: &DependencyGraph<T>, vertex: VertexId) -> Self {
        Self {
            vertex,
            dependencies: graph.dependencies(vertex),
            next: 0,
            order: 0,
        }
    }

    fn raise(&mut self, dependency_order: usize) {
        self.order = self.order.max(dependency_order + 1);
    }
}

/// Pass-local resolution state; dropped at the end of every pass
pub(crate) struct Resolver {
    marks: Vec<Mark>,
}

impl Resolver {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            marks: vec![Mark::Unvisited; len],
        }
    }

    pub(crate) fn order_of(&self, vertex: VertexId) -> Option<usize> {
        match self.marks.get(vertex.index()) {
            Some(Mark::Resolved(order)) => Some(*order),
            _ => None,
        }
    }

    /// Every vertex resolved so far with its order
    pub(crate) fn resolved(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.marks
            .iter()
            .enumerate()
            .filter_map(|(index, mark)| match mark {
                Mark::Resolved(order) => Some((VertexId::from_index(index), *order)),
                _ => None,
            })
    }

    /// Resolve `start` and everything below it
    pub(crate) fn resolve<T>(
        &mut self,
        graph: &DependencyGraph<T>,
        start: VertexId,
    ) -> Result<usize, CyclicDependencyError> {
        if let Some(order) = self.order_of(start) {
            return Ok(order);
        }

        self.marks[start.index()] = Mark::InProgress;
        let mut stack = vec![Frame::enter(graph, start)];

        while let Some(frame) = stack.last_mut() {
            if let Some(&dependency) = frame.dependencies.get(frame.next) {
                frame.next += 1;

                match self.marks[dependency.index()] {
                    Mark::Resolved(order) => frame.raise(order),
                    Mark::InProgress => return Err(Self::cycle(graph, &stack, dependency)),
                    Mark::Unvisited => {
                        self.marks[dependency.index()] = Mark::InProgress;
                        stack.push(Frame::enter(graph, dependency));
                    }
                }
                continue;
            }

            let (vertex, order) = (frame.vertex, frame.order);
            stack.pop();
            self.marks[vertex.index()] = Mark::Resolved(order);
            trace!(vertex = graph.name(vertex), order, "Resolved vertex order");

            match stack.last_mut() {
                Some(parent) => parent.raise(order),
                None => return Ok(order),
            }
        }

        // The loop only exits through the returns above
        Ok(self.order_of(start).unwrap_or_default())
    }

    /// Build the error for a back edge to `reentered`, which is on the stack
    fn cycle<T>(
        graph: &DependencyGraph<T>,
        stack: &[Frame],
        reentered: VertexId,
    ) -> CyclicDependencyError {
        let start = stack
            .iter()
            .position(|frame| frame.vertex == reentered)
            .unwrap_or(0);

        let mut vertices: Vec<VertexId> = stack[start..].iter().map(|frame| frame.vertex).collect();
        vertices.push(reentered);

        let path: Vec<String> = vertices
            .iter()
            .map(|vertex| graph.name(*vertex).to_string())
            .collect();

        debug!(cycle = %path.join(" → "), "Cyclic dependency found");
        CyclicDependencyError { path, vertices }
    }
}

/// Orders computed by one verification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexOrders {
    orders: HashMap<VertexId, usize>,
}

impl VertexOrders {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            orders: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, vertex: VertexId) -> Option<usize> {
        self.orders.get(&vertex).copied()
    }

    /// Compare two vertices of this pass by order; unknown vertices sort first
    pub fn compare(&self, a: VertexId, b: VertexId) -> Ordering {
        self.get(a).cmp(&self.get(b))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Highest order in the pass, i.e. the length of the longest dependency chain
    pub fn max_order(&self) -> Option<usize> {
        self.orders.values().copied().max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.orders.iter().map(|(vertex, order)| (*vertex, *order))
    }
}

/// Verifies that a set of vertices is acyclic and orders it
///
/// The verifier keeps no state between calls. Each call borrows the graph
/// mutably, resolves orders from a clean slate and commits them to the
/// vertices on success.
pub struct GraphVerifier;

impl GraphVerifier {
    /// Verify that `vertices` have no cycles and assign their orders
    ///
    /// Every dependency of a listed vertex must itself be listed; otherwise
    /// the call fails with [`DagError::MissingVertex`] before any vertex is
    /// touched. On a cycle the listed vertices are left reset (order 0).
    pub fn verify<T>(
        graph: &mut DependencyGraph<T>,
        vertices: &[VertexId],
    ) -> Result<VertexOrders, DagError> {
        for vertex in vertices {
            graph.ensure_contains(*vertex)?;
        }
        graph.ensure_closed(vertices)?;

        Self::reset_vertices(graph, vertices);

        let mut resolver = Resolver::new(graph.len());
        for vertex in vertices {
            resolver.resolve(graph, *vertex)?;
        }

        let mut orders = VertexOrders::with_capacity(vertices.len());
        for vertex in vertices {
            let order = resolver.order_of(*vertex).unwrap_or_default();
            graph.set_order(*vertex, order);
            orders.orders.insert(*vertex, order);
        }

        debug!(
            vertices = vertices.len(),
            depth = orders.max_order().unwrap_or_default(),
            "Verified dependency graph"
        );

        Ok(orders)
    }

    /// Verify `root` together with everything it transitively depends on
    pub fn verify_root<T>(
        graph: &mut DependencyGraph<T>,
        root: VertexId,
    ) -> Result<VertexOrders, DagError> {
        let closure = graph.transitive_closure(root)?;
        Self::verify(graph, &closure)
    }

    /// Verify `vertices` and sort them so every dependency comes first
    ///
    /// The sort is stable: vertices with equal order keep their relative
    /// position from the input.
    pub fn topological_sort<T>(
        graph: &mut DependencyGraph<T>,
        vertices: &mut [VertexId],
    ) -> Result<VertexOrders, DagError> {
        let orders = Self::verify(graph, vertices)?;
        vertices.sort_by_key(|vertex| orders.get(*vertex).unwrap_or_default());
        Ok(orders)
    }

    /// Reset the order of each listed vertex
    pub fn reset_vertices<T>(graph: &mut DependencyGraph<T>, vertices: &[VertexId]) {
        for vertex in vertices {
            graph.reset(*vertex);
        }
    }
}

#[cfg(test)]
mod tests {
    include!("verifier.test.rs");
}
