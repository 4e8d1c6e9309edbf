//! Vertices and the arena that owns them
//!
//! A [`DependencyGraph`] stores every [`Vertex`] in a petgraph `DiGraph` and
//! hands out [`VertexId`] handles. Identity is the handle, never the label:
//! two vertices called `"logger"` are still two distinct nodes.
//!
//! Edges point from a vertex to the vertices it depends on, so `a → b` reads
//! "a needs b ready first".

use super::error::{DagError, MissingVertexError};
use super::verifier::{GraphVerifier, Resolver};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, VisitMap, Visitable};
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// Handle to a vertex inside one [`DependencyGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(NodeIndex);

impl VertexId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(NodeIndex::new(index))
    }

    /// Position of the vertex in insertion order
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// One unit to be ordered, e.g. a container component
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    name: String,
    node: T,
    order: usize,
}

impl<T> Vertex<T> {
    fn new(name: String, node: T) -> Self {
        Self {
            name,
            node,
            order: 0,
        }
    }

    /// Diagnostic label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload carried alongside the vertex
    pub fn node(&self) -> &T {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut T {
        &mut self.node
    }

    /// Order assigned by the last successful verification (0 before that)
    pub fn order(&self) -> usize {
        self.order
    }

    /// Clear the order back to its initial value
    pub fn reset(&mut self) {
        self.order = 0;
    }

    /// Compare by resolved order; a stable sort on this yields a topological order
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl<T> fmt::Display for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Edge weight for "depends on"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependsOn;

impl fmt::Display for DependsOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("depends on")
    }
}

/// Arena of vertices and their dependency edges
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    graph: DiGraph<Vertex<T>, DependsOn>,
}

impl<T> DependencyGraph<T> {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
        }
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(vertices, edges),
        }
    }

    /// Add a vertex with a diagnostic label and a payload
    pub fn add_vertex(&mut self, name: impl Into<String>, node: T) -> VertexId {
        let vertex = Vertex::new(name.into(), node);
        trace!("Adding vertex: {}", vertex.name);
        VertexId(self.graph.add_node(vertex))
    }

    /// Record that `from` depends on `to`
    ///
    /// No cycle check happens here; cycles are reported by verification.
    /// Adding the same edge twice keeps a single edge.
    pub fn add_dependency(&mut self, from: VertexId, to: VertexId) -> Result<(), DagError> {
        self.ensure_contains(from)?;
        self.ensure_contains(to)?;

        if self.graph.find_edge(from.0, to.0).is_some() {
            trace!(
                "Dependency already recorded: {} -> {}",
                self.graph[from.0].name,
                self.graph[to.0].name
            );
            return Ok(());
        }

        self.graph.add_edge(from.0, to.0, DependsOn);
        Ok(())
    }

    /// Direct dependencies of `id`, in the order they were added
    pub fn dependencies(&self, id: VertexId) -> Vec<VertexId> {
        // petgraph walks outgoing edges newest first
        let mut deps: Vec<VertexId> = self.graph.neighbors(id.0).map(VertexId).collect();
        deps.reverse();
        deps
    }

    /// Labels of the direct dependencies of `id`
    pub fn dependency_names(&self, id: VertexId) -> Vec<&str> {
        self.dependencies(id)
            .into_iter()
            .map(|dep| self.graph[dep.0].name.as_str())
            .collect()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.graph.node_weight(id.0)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<T>> {
        self.graph.node_weight_mut(id.0)
    }

    /// Label of `id`, or `"<unknown>"` for a foreign handle
    pub fn name(&self, id: VertexId) -> &str {
        self.vertex(id).map(Vertex::name).unwrap_or("<unknown>")
    }

    /// Order of `id` from the last successful verification
    pub fn order(&self, id: VertexId) -> Option<usize> {
        self.vertex(id).map(Vertex::order)
    }

    /// First vertex carrying `name`, in insertion order
    pub fn find(&self, name: &str) -> Option<VertexId> {
        self.graph
            .node_indices()
            .find(|idx| self.graph[*idx].name == name)
            .map(VertexId)
    }

    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.graph.node_count()
    }

    /// All vertex handles in insertion order
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.node_indices().map(VertexId)
    }

    /// All vertices with their handles in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex<T>)> {
        self.graph
            .node_indices()
            .zip(self.graph.node_weights())
            .map(|(idx, vertex)| (VertexId(idx), vertex))
    }

    /// Get the number of vertices in the graph
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Get the number of dependency edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Clear the order of a single vertex
    pub fn reset(&mut self, id: VertexId) {
        if let Some(vertex) = self.graph.node_weight_mut(id.0) {
            vertex.reset();
        }
    }

    /// Clear the order of every vertex
    pub fn reset_all(&mut self) {
        for vertex in self.graph.node_weights_mut() {
            vertex.reset();
        }
    }

    /// Resolve the order of `id` and of everything it depends on
    ///
    /// Each reached vertex gets `1 + max(order of its dependencies)`, or 0
    /// without dependencies. Fails on the first cycle found below `id`.
    pub fn resolve_order(&mut self, id: VertexId) -> Result<usize, DagError> {
        self.ensure_contains(id)?;

        let mut resolver = Resolver::new(self.len());
        let order = resolver.resolve(self, id)?;
        for (vertex, resolved) in resolver.resolved() {
            self.set_order(vertex, resolved);
        }

        Ok(order)
    }

    /// `root` plus every vertex reachable through dependency edges, each once
    pub fn transitive_closure(&self, root: VertexId) -> Result<Vec<VertexId>, DagError> {
        self.ensure_contains(root)?;

        let mut closure = Vec::new();
        let mut dfs = Dfs::new(&self.graph, root.0);
        while let Some(idx) = dfs.next(&self.graph) {
            closure.push(VertexId(idx));
        }

        Ok(closure)
    }

    /// Every vertex, dependencies first; ties keep insertion order
    pub fn topological_order(&mut self) -> Result<Vec<VertexId>, DagError> {
        let mut ids: Vec<VertexId> = self.ids().collect();
        GraphVerifier::topological_sort(self, &mut ids)?;
        Ok(ids)
    }

    /// Render the graph in Graphviz DOT, edges pointing at dependencies
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    pub(crate) fn ensure_contains(&self, id: VertexId) -> Result<(), DagError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(DagError::VertexNotFound { index: id.index() })
        }
    }

    /// Check that every dependency of a listed vertex is listed as well
    pub(crate) fn ensure_closed(&self, vertices: &[VertexId]) -> Result<(), MissingVertexError> {
        let mut listed = self.graph.visit_map();
        for id in vertices {
            listed.visit(id.0);
        }

        for id in vertices {
            for dep in self.graph.neighbors(id.0) {
                if !listed.is_visited(&dep) {
                    return Err(MissingVertexError {
                        vertex: self.graph[dep].name.clone(),
                        required_by: self.graph[id.0].name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub(crate) fn set_order(&mut self, id: VertexId, order: usize) {
        if let Some(vertex) = self.graph.node_weight_mut(id.0) {
            vertex.set_order(order);
        }
    }
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("vertex.test.rs");
}
