//! MCP Tool Handlers
//!
//! The dispatcher routes a tool call to one of four handlers. Each handler
//! makes a single upstream request through [`AlphaVantageClient`] and always
//! comes back with a [`ToolResult`]; failures are folded into an error result
//! here and never leave this module as `Err`.

use fin_core::{AlphaVantageClient, InfoType};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::tools::{ToolKind, ToolResult};

/// Routes tool calls to their handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: AlphaVantageClient,
}

impl Dispatcher {
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AlphaVantageClient {
        &self.client
    }

    /// Handle a tool call by dispatching to the appropriate handler
    ///
    /// The handler's result is returned as is.
    pub async fn invoke(&self, tool_name: &str, arguments: Value) -> ToolResult {
        let Some(kind) = ToolKind::from_name(tool_name) else {
            tracing::warn!(tool = tool_name, "Unknown tool requested");
            return ToolResult::error(format!("Tool {} not found.", tool_name));
        };

        tracing::debug!(tool = tool_name, "Dispatching tool call");

        match kind {
            ToolKind::Ohlcv => self.handle_ohlcv(arguments).await,
            ToolKind::Dividends => self.handle_dividends(arguments).await,
            ToolKind::EtfHoldings => self.handle_etf_holdings(arguments).await,
            ToolKind::ExchangeRate => self.handle_exchange_rate(arguments).await,
        }
    }

    /// Handle get_ohlcv - one OHLCV value for one trading day
    async fn handle_ohlcv(&self, arguments: Value) -> ToolResult {
        let query: OhlcvQuery = match parse_args(ToolKind::Ohlcv, arguments) {
            Ok(query) => query,
            Err(result) => return result,
        };

        let series = match self.client.daily_time_series(&query.ticker).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(ticker = %query.ticker, error = %e, "Daily time series lookup failed");
                return ToolResult::error(format!(
                    "Failed to get the {} price for {}. Error: {}",
                    query.info_type, query.ticker, e
                ));
            }
        };

        // An empty date means the most recent trading day.
        let actual_date = if query.date.is_empty() {
            series.latest_date().unwrap_or_default().to_string()
        } else {
            query.date.clone()
        };

        let Some(bar) = series.get(&actual_date) else {
            return ToolResult::error(format!(
                "No data found for {} on {}.",
                query.ticker, actual_date
            ));
        };

        match query.info_type.parse::<InfoType>() {
            Ok(info_type) => ToolResult::text(format!(
                "The {} for {} on {} is {}",
                query.info_type,
                query.ticker,
                actual_date,
                bar.get(info_type)
            )),
            Err(message) => ToolResult::error(message),
        }
    }

    /// Handle get_dividends - dividend history, one line per payment
    async fn handle_dividends(&self, arguments: Value) -> ToolResult {
        let query: TickerQuery = match parse_args(ToolKind::Dividends, arguments) {
            Ok(query) => query,
            Err(result) => return result,
        };

        match self.client.dividends(&query.ticker).await {
            Ok(Some(records)) => {
                let lines = records.iter().map(|r| {
                    format!(
                        "Ex-Dividend Date: {}, Amount: {}",
                        r.ex_dividend_date, r.amount
                    )
                });
                ToolResult::text(with_header(
                    format!("Dividend history for {}:", query.ticker),
                    lines,
                ))
            }
            Ok(None) => {
                ToolResult::error(format!("No dividend data found for {}.", query.ticker))
            }
            Err(e) => {
                tracing::warn!(ticker = %query.ticker, error = %e, "Dividend lookup failed");
                ToolResult::error(format!(
                    "Failed to get the dividend data for {}. Error: {}",
                    query.ticker, e
                ))
            }
        }
    }

    /// Handle get_etf_holdings - ETF constituents and weights
    async fn handle_etf_holdings(&self, arguments: Value) -> ToolResult {
        let query: TickerQuery = match parse_args(ToolKind::EtfHoldings, arguments) {
            Ok(query) => query,
            Err(result) => return result,
        };

        match self.client.etf_holdings(&query.ticker).await {
            Ok(Some(holdings)) => {
                let lines = holdings.iter().map(|h| {
                    format!(
                        "Holding: {} ({}), Weight: {}",
                        h.description, h.symbol, h.weight
                    )
                });
                ToolResult::text(with_header(format!("Holdings for {}:", query.ticker), lines))
            }
            Ok(None) => {
                ToolResult::error(format!("No holdings data found for {}.", query.ticker))
            }
            Err(e) => {
                tracing::warn!(ticker = %query.ticker, error = %e, "Holdings lookup failed");
                ToolResult::error(format!(
                    "Failed to get the holdings data for {}. Error: {}",
                    query.ticker, e
                ))
            }
        }
    }

    /// Handle get_exchange_rate - realtime rate between two currencies
    async fn handle_exchange_rate(&self, arguments: Value) -> ToolResult {
        let query: ExchangeQuery = match parse_args(ToolKind::ExchangeRate, arguments) {
            Ok(query) => query,
            Err(result) => return result,
        };

        match self
            .client
            .exchange_rate(&query.from_currency, &query.to_currency)
            .await
        {
            Ok(Some(rate)) => ToolResult::text(format!(
                "The exchange rate from {} to {} is {}",
                query.from_currency, query.to_currency, rate.rate
            )),
            Ok(None) => ToolResult::error(format!(
                "Could not retrieve exchange rate for {} to {}.",
                query.from_currency, query.to_currency
            )),
            Err(e) => {
                tracing::warn!(
                    from = %query.from_currency,
                    to = %query.to_currency,
                    error = %e,
                    "Exchange rate lookup failed"
                );
                ToolResult::error(format!(
                    "Failed to get the exchange rate for {} to {}. Error: {}",
                    query.from_currency, query.to_currency, e
                ))
            }
        }
    }
}

/// Arguments for get_ohlcv
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OhlcvQuery {
    ticker: String,
    info_type: String,
    #[serde(default)]
    date: String,
}

/// Arguments for get_dividends and get_etf_holdings
#[derive(Debug, Deserialize)]
struct TickerQuery {
    ticker: String,
}

/// Arguments for get_exchange_rate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeQuery {
    from_currency: String,
    to_currency: String,
}

/// Deserialize a tool's arguments, or produce the error result to return
fn parse_args<T: DeserializeOwned>(tool: ToolKind, arguments: Value) -> Result<T, ToolResult> {
    // A call without arguments reads as an empty object.
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| {
        ToolResult::error(format!("Invalid arguments for {}: {}", tool.name(), e))
    })
}

fn with_header(header: String, lines: impl Iterator<Item = String>) -> String {
    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}
