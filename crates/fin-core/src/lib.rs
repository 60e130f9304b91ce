//! Core data access layer for fin-mcp
//!
//! This crate wraps the Alpha Vantage HTTP API behind a small typed client:
//!
//! - **Configuration**: API key and base URL resolved from a TOML file, `.env`,
//!   environment variables and CLI overrides
//! - **Client**: one GET per lookup, no caching and no retries
//! - **Models**: the handful of response shapes the tools read
//!
//! # Architecture
//!
//! ```text
//!          fin-mcp (tools, protocol)
//!                    |
//!                fin-core
//!                    |
//!         Alpha Vantage /query API
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fin_core::{AlphaVantageClient, Config};
//!
//! async fn example() -> fin_core::Result<()> {
//!     let config = Config::new("demo", fin_core::DEFAULT_BASE_URL)?;
//!     let client = AlphaVantageClient::new(config);
//!     let series = client.daily_time_series("IBM").await?;
//!     println!("{:?}", series.latest_date());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::AlphaVantageClient;
pub use config::{API_KEY_ENV, BASE_URL_ENV, Config, ConfigFile, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use models::{DailyBar, DividendRecord, ExchangeRate, Holding, InfoType, TimeSeriesDaily};
