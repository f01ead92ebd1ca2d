//! Siigo MCP server entry point.
//!
//! Loads configuration from the environment (and an optional `.env` file),
//! builds a [`SiigoClient`] and the operation [`Catalog`], then serves MCP
//! tools over stdio. The access token is fetched lazily on the first call.

mod catalog;
mod client;
mod config;
mod error;
mod params;
mod payloads;
mod response;
mod search;
mod server;

use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use crate::catalog::{Catalog, OPERATIONS};
use crate::client::SiigoClient;
use crate::config::Config;
use crate::server::SiigoMcpServer;

/// Runs the MCP server.
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid, the HTTP client
/// cannot be built, or the stdio transport encounters an error.
async fn run() -> Result<(), Box<dyn core::error::Error>> {
    // Initialise tracing to stderr (stdout is used for MCP stdio transport).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env file"),
        Err(err) if err.not_found() => tracing::debug!("no .env file found"),
        Err(err) => tracing::warn!(%err, "could not load .env file"),
    }

    let config = Config::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        partner_id = %config.partner_id,
        tools = OPERATIONS.len(),
        "starting Siigo MCP server"
    );

    let client = SiigoClient::new(&config)?;
    let mcp_server = SiigoMcpServer::new(Catalog::new(client));
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = mcp_server.serve(transport).await?;

    tracing::info!("MCP server running on stdio");
    let _quit_reason = service.waiting().await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(%err, "fatal error");
        std::process::exit(1);
    }
}
