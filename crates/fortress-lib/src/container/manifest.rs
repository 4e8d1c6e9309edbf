//! Component manifest: the components a container manages and what they require
//!
//! ```toml
//! [[component]]
//! name = "datasource"
//! role = "org.example.DataSource"
//! requires = ["logger"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {path}: {source}")]
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Component #{position} in {path} has an empty name")]
    EmptyName { path: PathBuf, position: usize },

    #[error("Component {component} in {path} requires an empty name")]
    EmptyRequirement { path: PathBuf, component: String },
}

/// One declared component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Unique component name; dependencies refer to it
    pub name: String,
    /// Service role or implementation the component provides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Names of the components that must start first
    #[serde(default)]
    pub requires: Vec<String>,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            requires: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn requiring<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Parsed manifest, components in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentManifest {
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentSpec>,
}

impl ComponentManifest {
    pub fn new(components: Vec<ComponentSpec>) -> Self {
        Self { components }
    }

    /// Parse a manifest from TOML text; `origin` only labels errors
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ManifestError> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| ManifestError::TomlParseError {
                path: origin.to_path_buf(),
                source: e,
            })?;

        manifest.validate(origin)?;
        trace!(
            "Parsed {} components from {}",
            manifest.components.len(),
            origin.display()
        );
        Ok(manifest)
    }

    /// Read and parse a manifest file
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Loading component manifest: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content, path)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn validate(&self, origin: &Path) -> Result<(), ManifestError> {
        for (position, component) in self.components.iter().enumerate() {
            if component.name.trim().is_empty() {
                return Err(ManifestError::EmptyName {
                    path: origin.to_path_buf(),
                    position: position + 1,
                });
            }
            if component.requires.iter().any(|dep| dep.trim().is_empty()) {
                return Err(ManifestError::EmptyRequirement {
                    path: origin.to_path_buf(),
                    component: component.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
