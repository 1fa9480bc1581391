// MCP (Model Context Protocol) server for the Hospital Authority feeds
// Tools are served to agent clients over stdio or HTTP

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;

use hk_health_core::{HealthConfig, HealthFeeds, HealthResult};
use tools::ToolRegistry;

/// Build a server with every feed tool registered against production fetchers.
pub fn build_server(config: &HealthConfig) -> HealthResult<McpServer> {
    let feeds = HealthFeeds::from_config(config)?;
    let mut registry = ToolRegistry::new();
    tools::register_all(&mut registry, &feeds);

    tracing::info!("Registered {} tools", registry.len());
    Ok(McpServer::new(registry))
}
