//! Startup and shutdown sequencing for the components of a manifest
//!
//! Components start in ascending order (dependencies first) and shut down in
//! exactly the reverse sequence.

use super::manifest::{ComponentManifest, ManifestError};
use crate::dag::{DagError, DependencyGraph, VertexId};
use crate::primitives::LogContext;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while planning a container lifecycle
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Graph(#[from] DagError),
}

impl ContainerError {
    /// Component names along the offending cycle, if this is a cycle failure
    pub fn cycle_path(&self) -> Option<&[String]> {
        match self {
            ContainerError::Graph(err) => err.as_cycle().map(|cycle| cycle.path.as_slice()),
            ContainerError::Manifest(_) => None,
        }
    }
}

/// Payload carried by each vertex of a container graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentEntry {
    pub role: Option<String>,
    /// Required by some component but never declared in the manifest
    pub external: bool,
}

/// One component in a lifecycle sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedComponent {
    pub name: String,
    pub order: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub requires: Vec<String>,
    pub external: bool,
}

impl PlannedComponent {
    /// `#<position> (<order>) : <name> [ deps ]`, deps only listed above order 0
    pub fn describe(&self, position: usize) -> String {
        let mut line = format!("#{} ({}) : {}", position, self.order, self.name);
        if self.order > 0 {
            line.push_str(&format!(" [ {} ]", self.requires.join(", ")));
        }
        line
    }
}

/// Verified startup sequence of a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LifecyclePlan {
    startup: Vec<PlannedComponent>,
}

impl LifecyclePlan {
    /// Load a manifest and plan it
    pub fn from_path(path: &Path) -> Result<Self, ContainerError> {
        let manifest = ComponentManifest::from_path(path)?;
        Self::from_manifest(&manifest)
    }

    /// Order the components of `manifest`, failing on dependency cycles
    pub fn from_manifest(manifest: &ComponentManifest) -> Result<Self, ContainerError> {
        let mut graph = Self::build_graph(manifest)?;
        let sequence = graph.topological_order()?;

        let startup = sequence
            .into_iter()
            .filter_map(|id| {
                let vertex = graph.vertex(id)?;
                Some(PlannedComponent {
                    name: vertex.name().to_string(),
                    order: vertex.order(),
                    role: vertex.node().role.clone(),
                    requires: graph
                        .dependency_names(id)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    external: vertex.node().external,
                })
            })
            .collect();

        let plan = Self { startup };
        plan.log_startup();
        Ok(plan)
    }

    /// Build the dependency graph of `manifest`
    ///
    /// Each name maps to exactly one vertex: a component declared twice is
    /// merged, and a required name that is never declared gets an external
    /// vertex of its own.
    pub fn build_graph(
        manifest: &ComponentManifest,
    ) -> Result<DependencyGraph<ComponentEntry>, ContainerError> {
        let mut graph = DependencyGraph::with_capacity(manifest.len(), manifest.len());
        let mut by_name: HashMap<&str, VertexId> = HashMap::new();

        for component in &manifest.components {
            let id = *by_name
                .entry(component.name.as_str())
                .or_insert_with(|| graph.add_vertex(component.name.as_str(), ComponentEntry::default()));

            if let Some(vertex) = graph.vertex_mut(id) {
                let entry = vertex.node_mut();
                entry.external = false;
                if entry.role.is_none() {
                    entry.role = component.role.clone();
                }
            }

            for required in &component.requires {
                let dep = *by_name.entry(required.as_str()).or_insert_with(|| {
                    trace!("{} requires undeclared component {}", component.name, required);
                    graph.add_vertex(
                        required.as_str(),
                        ComponentEntry {
                            role: None,
                            external: true,
                        },
                    )
                });
                graph.add_dependency(id, dep)?;
            }
        }

        debug!(
            components = graph.len(),
            dependencies = graph.edge_count(),
            "Built container dependency graph"
        );
        Ok(graph)
    }

    /// Components in startup order
    pub fn startup(&self) -> &[PlannedComponent] {
        &self.startup
    }

    /// Components in shutdown order, the reverse of startup
    pub fn shutdown(&self) -> std::iter::Rev<std::slice::Iter<'_, PlannedComponent>> {
        self.startup.iter().rev()
    }

    pub fn get(&self, name: &str) -> Option<&PlannedComponent> {
        self.startup.iter().find(|component| component.name == name)
    }

    pub fn len(&self) -> usize {
        self.startup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.startup.is_empty()
    }

    /// Components required but not declared
    pub fn external(&self) -> impl Iterator<Item = &PlannedComponent> {
        self.startup.iter().filter(|component| component.external)
    }

    pub fn log_startup(&self) {
        Self::log_sequence("startup", "Component initialization order:", self.startup.iter());
    }

    pub fn log_shutdown(&self) {
        Self::log_sequence("shutdown", "Component shutdown order:", self.shutdown());
    }

    fn log_sequence<'a>(
        operation: &str,
        heading: &str,
        components: impl ExactSizeIterator<Item = &'a PlannedComponent>,
    ) {
        let mut context = LogContext::with_progress(operation, components.len() as u64);
        debug!(operation = %context.operation, "{}", heading);

        for (index, component) in components.enumerate() {
            context.set_progress(index as u64 + 1);
            debug!(
                operation = %context.operation,
                current = context.current_item,
                total = context.total_items,
                "  {}",
                component.describe(index + 1)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    include!("plan.test.rs");
}
