//! Configuration loading
//!
//! Coordinates loading configuration from its sources in precedence order:
//! defaults -> .env -> env vars -> CLI.

use crate::primitives::{ColorIntent, ConfigError};
use clap::Parser;
use std::path::Path;
use tracing::trace;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};

/// Dotenv files consulted before parsing, first one wins per variable
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` and `.env` from the working directory if present
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            Self::load_env_file(Path::new(env_file))?;
        }
        Ok(())
    }

    /// Load one dotenv file; a missing file is not an error
    pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
        match dotenvy::from_path(path) {
            Ok(()) => {
                trace!("Loaded environment file {}", path.display());
                Ok(())
            }
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::EnvFileError {
                file: path.display().to_string(),
                source: e,
            }),
        }
    }
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        // 1. .env files feed the env-backed CLI options
        AppConfig::load_env_files()?;

        // 2. CLI arguments and FORTRESS_* variables (exits on --help/--version)
        let config: CliConfig = Cli::parse().into();

        // 3. Standard color variables, then validation
        config.finish(&EnvironmentConfig::load()?)
    }

    /// Apply standard environment variables and validate
    pub fn finish(mut self, environment: &EnvironmentConfig) -> Result<Self, ConfigError> {
        // Explicit --color/FORTRESS_COLOR beats NO_COLOR and friends
        if self.app_config.color == ColorIntent::Auto {
            self.app_config.color = environment.apply_color_config(ColorIntent::Auto);
        }

        self.app_config.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
