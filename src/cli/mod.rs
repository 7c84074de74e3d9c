//! Command-line interface for the blueprint console.
//!
//! The binary replays a scenario file through a freshly activated
//! [`ConsolePlugin`](crate::plugin::ConsolePlugin) and prints the result.
//!
//! # Commands
//!
//! - `render <scenario>` writes the container page as HTML
//! - `list <scenario>` prints the ordered containers as a table or JSON
//!
//! # Global options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//! - `--config` / `-c`: alternative `config.toml`

mod list;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::PluginConfig;
use crate::plugin::ConsolePlugin;
use crate::scenario::Scenario;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter. `RUST_LOG` takes precedence when set.
    pub log_level: String,

    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_str()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "bpconsole",
    about = "Inspect blueprint containers from a recorded notification scenario",
    version,
    long_about = "bpconsole replays container discovery and lifecycle notifications and shows the resulting blueprint container state."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config.toml (default: ~/.bpconsole/config.toml)
    #[arg(short, long, global = true, env = "BPCONSOLE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the container page as HTML
    Render(render::RenderCommand),

    /// List containers in display order
    List(list::ListCommand),
}

impl Cli {
    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Render(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Load configuration, activate a plugin and replay `scenario` through it.
async fn replay_scenario(config: &CliConfig, scenario: &Path) -> Result<ConsolePlugin> {
    let plugin_config = PluginConfig::load_with_optional(config.config_path.clone()).await?;
    let mut plugin = ConsolePlugin::new(plugin_config).await?;

    let scenario = Scenario::load(scenario).await?;
    let (tracker, listener) = plugin.activate();
    scenario.replay(&tracker, &listener)?;

    tracing::info!(
        "Replayed {} steps over {} modules, {} containers recorded",
        scenario.steps.len(),
        scenario.modules.len(),
        plugin.snapshot_all().len()
    );
    Ok(plugin)
}
