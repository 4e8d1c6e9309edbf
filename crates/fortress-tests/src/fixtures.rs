//! Fixture infrastructure for E2E tests
//!
//! Builds component manifests in temporary directories and runs commands
//! against them with captured output.

use anyhow::Result;
use fortress_lib::application::cli::Commands;
use fortress_lib::application::commands::execute_command_with_output;
use fortress_lib::application::config::AppConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Incrementally written `[[component]]` document
#[derive(Debug, Default, Clone)]
pub struct ManifestBuilder {
    content: String,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component without a role
    pub fn component(self, name: &str, requires: &[&str]) -> Self {
        self.push(name, None, requires)
    }

    /// Append a component with a role
    pub fn component_with_role(self, name: &str, role: &str, requires: &[&str]) -> Self {
        self.push(name, Some(role), requires)
    }

    fn push(mut self, name: &str, role: Option<&str>, requires: &[&str]) -> Self {
        self.content.push_str("[[component]]\n");
        self.content.push_str(&format!("name = {:?}\n", name));
        if let Some(role) = role {
            self.content.push_str(&format!("role = {:?}\n", role));
        }
        let quoted: Vec<String> = requires.iter().map(|r| format!("{:?}", r)).collect();
        self.content
            .push_str(&format!("requires = [{}]\n\n", quoted.join(", ")));
        self
    }

    pub fn build(self) -> String {
        self.content
    }
}

/// Temporary directory holding one manifest
pub struct ManifestWorkspace {
    _temp_dir: TempDir,
    manifest: PathBuf,
}

impl ManifestWorkspace {
    pub fn new(content: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let manifest = temp_dir.path().join("components.toml");
        std::fs::write(&manifest, content)?;
        Ok(Self {
            _temp_dir: temp_dir,
            manifest,
        })
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Run a command built from the manifest path and capture stdout
    pub fn run(
        &self,
        config: &AppConfig,
        command: impl FnOnce(PathBuf) -> Commands,
    ) -> Result<String> {
        let mut out = Vec::new();
        execute_command_with_output(command(self.manifest.clone()), config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }
}
