//! summit-server: HTTP API for peak lookup.

use anyhow::Result;
use clap::Parser;
use summit_core::config::Config;
use summit_server::{start_server, state::State};
use summit_telemetry::TelemetryConfig;

#[derive(Parser)]
#[command(name = "summit-server")]
#[command(about = "Serve nearest-peak lookups over HTTP")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $SUMMIT_CONFIG or ./summit.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(port) = cli.port {
        config.schema.server.port = port;
    }

    let logging = &config.schema.logging;
    let level = if cli.verbose { "debug".to_string() } else { logging.level.clone() };
    summit_telemetry::init_with_config(TelemetryConfig::with_level(level, logging.json))?;

    tracing::info!(config = ?config.path, "Initializing state...");
    let state = State::from_config(&config.schema);

    start_server(state).await
}
