//! Failures raised while ordering a dependency graph

use super::vertex::VertexId;
use thiserror::Error;

/// A dependency cycle was found while resolving vertex orders.
///
/// `path` is closed: the first and last entries name the same vertex, so a
/// self-loop on `a` is reported as `a → a`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cyclic dependency detected: {}", path.join(" → "))]
pub struct CyclicDependencyError {
    /// Vertex labels along the cycle, in dependency direction
    pub path: Vec<String>,
    /// Vertex handles along the cycle, parallel to `path`
    pub vertices: Vec<VertexId>,
}

impl CyclicDependencyError {
    /// Vertices taking part in the cycle, without the closing repeat
    pub fn participants(&self) -> &[VertexId] {
        match self.vertices.split_last() {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.vertices,
        }
    }
}

/// A listed vertex depends on a vertex that was not passed to the verifier.
///
/// This is a usage error, not a property of the graph: every vertex reachable
/// from the collection must be part of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("A dependent vertex ({vertex}) of vertex ({required_by}) was not included in the vertices list")]
pub struct MissingVertexError {
    pub vertex: String,
    pub required_by: String,
}

/// Errors that can occur while building or verifying a dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DagError {
    #[error(transparent)]
    CyclicDependency(#[from] CyclicDependencyError),

    #[error(transparent)]
    MissingVertex(#[from] MissingVertexError),

    #[error("Vertex not found: #{index}")]
    VertexNotFound { index: usize },
}

impl DagError {
    /// The cycle, if this error reports one
    pub fn as_cycle(&self) -> Option<&CyclicDependencyError> {
        match self {
            DagError::CyclicDependency(cycle) => Some(cycle),
            _ => None,
        }
    }

    pub fn is_cycle(&self) -> bool {
        self.as_cycle().is_some()
    }
}
