//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const OUTPUT: &str = "text";

    /// Highest accepted verbosity (trace)
    pub const MAX_LOG_LEVEL: u8 = 4;
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(0)
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap_or(LogOutput::Stderr)
    }

    pub fn color() -> ColorIntent {
        defaults::COLOR.parse().unwrap_or(ColorIntent::Auto)
    }

    pub fn output() -> OutputFormat {
        defaults::OUTPUT.parse().unwrap_or(OutputFormat::Text)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "FORTRESS_LOG_LEVEL", default_value = defaults::LOG_LEVEL, global = true)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "FORTRESS_LOG_FORMAT", default_value = defaults::LOG_FORMAT, global = true)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "FORTRESS_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT, global = true)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "FORTRESS_COLOR", default_value = defaults::COLOR, global = true)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Result format written to stdout (text, json)
    #[arg(short, long, env = "FORTRESS_OUTPUT", default_value = defaults::OUTPUT, global = true)]
    #[serde(default = "default_fns::output")]
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            output: default_fns::output(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color_enabled(),
        }
    }

    /// Resolve the color intent against the terminal
    pub fn color_enabled(&self) -> bool {
        match self.color {
            ColorIntent::Always => true,
            ColorIntent::Never => false,
            ColorIntent::Auto => console::colors_enabled(),
        }
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level > defaults::MAX_LOG_LEVEL {
            return Err(ConfigError::ValidationFailed {
                reason: format!(
                    "log level {} is above the maximum of {}",
                    self.log_level,
                    defaults::MAX_LOG_LEVEL
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
