//! # fortress Library
//!
//! Dependency verification and deterministic lifecycle ordering for
//! component containers.
//!
//! ## Core Modules
//!
//! - [`dag`] - Dependency graph, cycle detection and topological sort
//! - [`container`] - Component manifests and startup/shutdown planning
//! - [`primitives`] - Foundation types and errors
//! - [`logger`] - Structured logging
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```
//! use fortress_lib::dag::{DependencyGraph, GraphVerifier};
//!
//! let mut graph = DependencyGraph::new();
//! let root = graph.add_vertex("Root", ());
//! let child = graph.add_vertex("Child", ());
//! graph.add_dependency(root, child).unwrap();
//!
//! let mut ids = vec![root, child];
//! GraphVerifier::topological_sort(&mut graph, &mut ids).unwrap();
//! assert_eq!(ids, vec![child, root]);
//! ```

pub mod application;
pub mod container;
pub mod dag;
pub mod logger;
pub mod primitives;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use container::{ComponentManifest, ContainerError, LifecyclePlan};
pub use dag::{CyclicDependencyError, DagError, DependencyGraph, GraphVerifier, Vertex, VertexId};
pub use logger::Logger;
pub use primitives::{ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config)
}
