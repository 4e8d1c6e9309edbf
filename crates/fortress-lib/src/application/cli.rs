use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use super::config::AppConfig;

/// fortress CLI - dependency-ordered component lifecycles
#[derive(Debug, Clone, Parser)]
#[command(name = "fortress")]
#[command(about = "Verify component dependencies and plan startup/shutdown order")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// fortress commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Parse an explicit argument list (the first item is the binary name)
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Ok(cli.into())
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available fortress commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Verify that a manifest has no dependency cycles
    Check {
        /// Component manifest (TOML)
        #[arg(help = "Path to the component manifest")]
        manifest: PathBuf,
    },

    /// Print the startup (or shutdown) order of a manifest
    Order {
        /// Component manifest (TOML)
        #[arg(help = "Path to the component manifest")]
        manifest: PathBuf,

        /// Print the shutdown order instead
        #[arg(short, long, help = "List components in shutdown order")]
        shutdown: bool,
    },

    /// Print the dependency graph in Graphviz DOT format
    Graph {
        /// Component manifest (TOML)
        #[arg(help = "Path to the component manifest")]
        manifest: PathBuf,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Manifest the command operates on, if any
    pub fn manifest(&self) -> Option<&PathBuf> {
        match self {
            Commands::Check { manifest }
            | Commands::Order { manifest, .. }
            | Commands::Graph { manifest } => Some(manifest),
            Commands::Version => None,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
