//! Financial data MCP Server
//!
//! A Model Context Protocol server that answers stock, dividend, ETF and
//! exchange-rate questions from the Alpha Vantage API.
//!
//! # Usage
//!
//! ```bash
//! fin-mcp [--config <path>] [--base-url <url>]
//! ```
//!
//! # Environment Variables
//!
//! - `ALPHA_VANTAGE_API_KEY`: API key (required, may come from `.env`)
//! - `ALPHA_VANTAGE_BASE_URL`: Override the upstream endpoint
//! - `RUST_LOG`: Control log verbosity (default: `fin_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use fin_core::{AlphaVantageClient, Config};
use fin_mcp::{Dispatcher, FinMcpServer};

/// MCP server for Alpha Vantage financial data
#[derive(Parser)]
#[command(name = "fin-mcp")]
#[command(about = "MCP server for Alpha Vantage financial data")]
#[command(version)]
struct Args {
    /// TOML config file with api_key and base_url
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upstream base URL, overrides config and environment
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fin_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // No key, no tools: stop before serving anything.
    let config = Config::load(args.config.as_deref(), args.base_url).inspect_err(|e| {
        tracing::error!(error = %e, "Configuration error");
    })?;

    tracing::info!(?config, "Starting fin-mcp server");

    let dispatcher = Dispatcher::new(AlphaVantageClient::new(config));
    let mut server = FinMcpServer::new(dispatcher);
    server.run().await?;

    Ok(())
}
