//! `bpconsole render`: write the container page as HTML.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::{CliConfig, replay_scenario};

#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Scenario file to replay
    scenario: PathBuf,

    /// Write the page to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let plugin = replay_scenario(config, &self.scenario).await?;
        let html = plugin.render_page()?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &html)
                    .await
                    .with_context(|| format!("Failed to write page to {}", path.display()))?;
                tracing::info!("Wrote {} bytes to {}", html.len(), path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}
