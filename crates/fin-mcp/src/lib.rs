//! MCP Server for financial data lookups
//!
//! This crate exposes a handful of Alpha Vantage lookups as Model Context
//! Protocol tools, so an agent can ask for a closing price, a dividend
//! history, ETF holdings or an exchange rate.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (Claude/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ fin-mcp (server, registry, dispatcher) ]
//!        | (Rust API)
//!        v
//! [ fin-core (AlphaVantageClient) ]
//!        | (HTTPS)
//!        v
//! [ www.alphavantage.co/query ]
//! ```
//!
//! # Tools
//!
//! - `get_ohlcv` - open/high/low/close/volume for a trading day
//! - `get_dividends` - dividend history
//! - `get_etf_holdings` - ETF constituents and weights
//! - `get_exchange_rate` - realtime fiat or crypto exchange rate

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use handlers::Dispatcher;
pub use server::FinMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolKind, ToolResult, get_tool_definitions};
