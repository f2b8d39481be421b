//! oz-logs: analyze, filter, tail and export log files from the command line.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use oz_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays clean for results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "oz-logs starting");

    if let Err(e) = oz_cli::run_cli(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
