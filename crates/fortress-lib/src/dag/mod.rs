//! # Dependency Graph Module
//!
//! Cycle detection and deterministic ordering for component dependencies.
//!
//! ## Modules
//!
//! - [`vertex`] - Vertex arena with dependency edges
//! - [`verifier`] - Order resolution, verification and topological sort
//! - [`error`] - Cycle and missing-vertex failures

pub mod error;
pub mod verifier;
pub mod vertex;

pub use error::{CyclicDependencyError, DagError, MissingVertexError};
pub use verifier::{GraphVerifier, VertexOrders};
pub use vertex::{DependencyGraph, DependsOn, Vertex, VertexId};
