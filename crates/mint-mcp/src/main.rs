//! MCP server binary for Mint.ai brand-visibility analytics

mod server;

use mint_tools::ToolRegistry;
use mint_visibility::api::MintClient;
use mint_visibility::config::MintConfig;
use mint_visibility::tools::{
    CitationsTool, DomainsTopicsTool, MonthlySummaryTool, VisibilityScoresTool,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use server::McpServer;

/// Initialize tracing on stderr; stdout carries the protocol
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Arc::new(MintConfig::from_env());
    if config.api_key.is_none() {
        warn!("MINT_API_KEY is not set; every tool call will fail until it is");
    }

    let client = MintClient::new(&config)?;

    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(DomainsTopicsTool::new(client.clone())));
    registry.register(Arc::new(VisibilityScoresTool::new(
        client.clone(),
        Arc::clone(&config),
    )));
    registry.register(Arc::new(CitationsTool::new(
        client.clone(),
        Arc::clone(&config),
    )));
    registry.register(Arc::new(MonthlySummaryTool::new(client, config)));

    info!(
        "Starting Mint visibility MCP server with {} tools",
        registry.len()
    );

    let server = McpServer::new(registry);
    server.run(tokio::io::stdin(), tokio::io::stdout()).await
}
