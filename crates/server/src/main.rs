use anyhow::{Context, Result};
use clap::Parser;
use hk_health_core::HealthConfig;
use std::path::PathBuf;

mod api;

#[derive(Parser, Debug)]
#[command(name = "hk-health-server")]
#[command(about = "HK Health MCP Server - Hospital Authority open data over HTTP", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "HK_HEALTH_CONFIG", default_value = "hk-health.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "HK_HEALTH_PORT", default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "HK_HEALTH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hk_health=info,tower_http=debug".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("Starting HK Health MCP Server (HTTP)");

    // Load configuration
    let config = HealthConfig::load(&args.config).context("Failed to load configuration")?;
    let server = hk_health_mcp::build_server(&config).context("Failed to build MCP server")?;

    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, server).await?;

    Ok(())
}
