//! Command execution handlers
//!
//! Each handler loads a manifest, plans it and writes the result to the
//! supplied output, so tests can capture what a user would see on stdout.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::container::{ComponentManifest, LifecyclePlan, PlannedComponent};
use crate::logger::Logger;
use crate::primitives::OutputFormat;
use anyhow::{Context, Result};
use console::style;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Execute CLI commands
pub fn execute_command(config: CliConfig) -> Result<()> {
    let colors = config.app_config.color_enabled();
    console::set_colors_enabled(colors);
    console::set_colors_enabled_stderr(colors);

    Logger::init(config.app_config.to_logger_config())?;

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            eprintln!("fortress - dependency-ordered component lifecycles");
            eprintln!("{}", style("Run 'fortress --help' for usage information").dim());
            return Ok(());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command_with_output(command, &config.app_config, &mut out)
}

/// Execute a specific command, writing results to `out` (for testing)
pub fn execute_command_with_output(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    debug!(?command, "Executing command");
    match command {
        Commands::Check { manifest } => handle_check(&manifest, config, out),
        Commands::Order { manifest, shutdown } => handle_order(&manifest, shutdown, config, out),
        Commands::Graph { manifest } => handle_graph(&manifest, out),
        Commands::Version => handle_version(out),
    }
}

fn load_plan(manifest: &Path) -> Result<LifecyclePlan> {
    LifecyclePlan::from_path(manifest)
        .with_context(|| format!("Failed to plan components in {}", manifest.display()))
}

fn handle_check(manifest: &Path, config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let plan = load_plan(manifest)?;
    info!(components = plan.len(), "Manifest verified");

    match config.output {
        OutputFormat::Text => {
            writeln!(
                out,
                "{} {} components, no cycles",
                style("✓").green(),
                plan.len()
            )?;
            let external = plan.external().count();
            if external > 0 {
                writeln!(
                    out,
                    "  {} required but not declared",
                    style(external).yellow()
                )?;
            }
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "manifest": manifest.display().to_string(),
                "components": plan.len(),
                "external": plan.external().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                "acyclic": true,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

fn handle_order(
    manifest: &Path,
    shutdown: bool,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let plan = load_plan(manifest)?;
    let sequence: Vec<&PlannedComponent> = if shutdown {
        plan.log_shutdown();
        plan.shutdown().collect()
    } else {
        plan.startup().iter().collect()
    };

    match config.output {
        OutputFormat::Text => {
            let heading = if shutdown {
                "Component shutdown order:"
            } else {
                "Component initialization order:"
            };
            writeln!(out, "{}", style(heading).bold())?;
            for (index, component) in sequence.iter().enumerate() {
                writeln!(out, "  {}", component.describe(index + 1))?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&sequence)?)?;
        }
    }
    Ok(())
}

/// DOT output does not require the graph to be acyclic
fn handle_graph(manifest: &Path, out: &mut dyn Write) -> Result<()> {
    let components = ComponentManifest::from_path(manifest)
        .with_context(|| format!("Failed to load {}", manifest.display()))?;
    let graph = LifecyclePlan::build_graph(&components)?;
    write!(out, "{}", graph.to_dot())?;
    Ok(())
}

fn handle_version(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "fortress {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
