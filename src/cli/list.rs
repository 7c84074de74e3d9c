//! `bpconsole list`: print containers in display order.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

use super::{CliConfig, replay_scenario};
use crate::render::{ContainerView, PageView};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Scenario file to replay
    scenario: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also print every recipe of every container
    #[arg(long)]
    recipes: bool,
}

impl ListCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let plugin = replay_scenario(config, &self.scenario).await?;
        let page = plugin.page_view()?;

        let mut stdout = std::io::stdout().lock();
        match self.format {
            OutputFormat::Json => write_json(&page, &mut stdout)?,
            OutputFormat::Table => write_table(&page, self.recipes, &mut stdout)?,
        }
        Ok(())
    }
}

fn write_json(page: &PageView, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&page.containers)?)?;
    Ok(())
}

fn write_table(page: &PageView, recipes: bool, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", page.title.bold())?;
    writeln!(out)?;

    if page.containers.is_empty() {
        writeln!(out, "No blueprint containers available.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<8} {:<32} {:<12} {:<14} {:<30} {:<11} {}",
        "Module".cyan().bold(),
        "Symbolic name".cyan().bold(),
        "Version".cyan().bold(),
        "State".cyan().bold(),
        "Timestamp".cyan().bold(),
        "Unsatisfied".cyan().bold(),
        "Missing".cyan().bold()
    )?;
    writeln!(out, "{}", "-".repeat(120).bright_black())?;

    for container in &page.containers {
        writeln!(
            out,
            "{:<8} {:<32} {:<12} {:<14} {:<30} {:<11} {}",
            container.module_id,
            container.symbolic_name,
            container.version,
            colored_state(container),
            container.timestamp,
            container.unsatisfied_count,
            container.missing_dependencies
        )?;

        if !container.cause_stack_trace.is_empty() {
            for line in container.cause_stack_trace.lines() {
                writeln!(out, "         {}", line.red())?;
            }
        }

        if recipes {
            for recipe in &container.recipes {
                let status = match recipe.status_class {
                    "satisfied" => recipe.satisfied.green(),
                    "unsatisfied" => recipe.satisfied.red(),
                    _ => recipe.satisfied.normal(),
                };
                writeln!(out, "         {:<40} {:<6} {}", recipe.name, status, recipe.selector.bright_black())?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}: {} containers, {} unsatisfied",
        "Total".green().bold(),
        page.container_count,
        page.unsatisfied_total
    )?;
    Ok(())
}

fn colored_state(container: &ContainerView) -> colored::ColoredString {
    match container.event_class {
        "ok" => container.event_type.green(),
        "error" => container.event_type.red().bold(),
        "warning" => container.event_type.yellow(),
        _ => container.event_type.normal(),
    }
}
