//! OpsZen log analyzer CLI library.
//!
//! Exposes argument parsing, configuration and the command runner so the
//! `oz-logs` binary stays thin and `oz-e2e-tests` can drive commands directly.

pub mod cli;
pub mod config;
pub mod follow;
pub mod render;

use std::io::Write;
use std::time::Duration;

use oz_log_analyzer::{FileLogSource, LogSource, ToolRegistry};

use crate::cli::{Cli, Command};
use crate::config::CliConfig;

/// Run one parsed command against `source`, writing output to `out`.
pub async fn run(
    cli: &Cli,
    config: &CliConfig,
    source: &dyn LogSource,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let registry = ToolRegistry::with_defaults(&config.analyzer);
    tracing::debug!(
        tool = ?cli.command.tool_name(),
        tool_count = registry.len(),
        "dispatching command"
    );

    let Some(tool) = cli.command.tool_name() else {
        let tools = registry.list_tools();
        if cli.json {
            render::render_json(&tools, out)?;
        } else {
            render::render_tools(&tools, out)?;
        }
        return Ok(());
    };

    if let Command::Tail {
        file,
        lines,
        follow: true,
        interval_ms,
    } = &cli.command
    {
        let interval = Duration::from_millis(interval_ms.unwrap_or(config.follow_interval_ms).max(1));
        return follow::follow(&config.analyzer, source, file, *lines, interval, out).await;
    }

    let result = registry
        .execute(tool, cli.command.tool_args(), source)
        .await?;
    if cli.json {
        render::render_json(&result, out)?;
    } else {
        render::render(&result, out)?;
    }
    if !result.success {
        anyhow::bail!(
            "{}",
            result.error.unwrap_or_else(|| "command failed".to_string())
        );
    }
    Ok(())
}

/// Load configuration and run against the local filesystem, printing to stdout.
pub async fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let mut stdout = std::io::stdout();
    run(&cli, &config, &FileLogSource, &mut stdout).await
}
