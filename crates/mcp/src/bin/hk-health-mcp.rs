// Standalone MCP server binary (stdio transport)

use anyhow::{Context, Result};
use clap::Parser;
use hk_health_core::HealthConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hk-health-mcp")]
#[command(about = "HK Health MCP Server - Hospital Authority open data over stdio", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "HK_HEALTH_CONFIG", default_value = "hk-health.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing on stderr; stdout carries JSON-RPC
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hk_health=info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("HK Health MCP Server starting...");

    let config = HealthConfig::load(&args.config).context("Failed to load configuration")?;
    let server = hk_health_mcp::build_server(&config).context("Failed to build MCP server")?;

    server.serve_stdio().await?;

    Ok(())
}
