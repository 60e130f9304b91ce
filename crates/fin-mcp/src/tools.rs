//! MCP tool registry
//!
//! Static descriptions of the tools this server exposes, and the result
//! envelope every tool returns.
//!
//! # Tools
//!
//! | Name | Upstream function | Arguments |
//! |------|-------------------|-----------|
//! | `get_ohlcv` | `TIME_SERIES_DAILY` | `ticker`, `infoType`, `date` |
//! | `get_dividends` | `DIVIDENDS` | `ticker` |
//! | `get_etf_holdings` | `ETF_PROFILE` | `ticker` |
//! | `get_exchange_rate` | `CURRENCY_EXCHANGE_RATE` | `fromCurrency`, `toCurrency` |

use fin_core::InfoType;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Tool definition for MCP protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
///
/// Success and failure share this shape; only `is_error` and the text differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default)]
    pub is_error: bool,
}

/// Content types for tool results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Text of the first content item
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            ToolContent::Text { text } => Some(text.as_str()),
        })
    }
}

/// The closed set of tools this server can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Ohlcv,
    Dividends,
    EtfHoldings,
    ExchangeRate,
}

impl ToolKind {
    /// Registry order, also the order of `tools/list`
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Ohlcv,
        ToolKind::Dividends,
        ToolKind::EtfHoldings,
        ToolKind::ExchangeRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Ohlcv => "get_ohlcv",
            ToolKind::Dividends => "get_dividends",
            ToolKind::EtfHoldings => "get_etf_holdings",
            ToolKind::ExchangeRate => "get_exchange_rate",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn definition(&self) -> ToolDefinition {
        let (description, input_schema) = match self {
            ToolKind::Ohlcv => (
                "Get the open, high, low, close or volume of a stock for a given trading day",
                json!({
                    "type": "object",
                    "properties": {
                        "ticker": {
                            "type": "string",
                            "description": "Stock ticker symbol, e.g. AAPL"
                        },
                        "infoType": {
                            "type": "string",
                            "enum": InfoType::ALL.map(|t| t.as_str()),
                            "description": "Which daily value to return"
                        },
                        "date": {
                            "type": "string",
                            "pattern": r"^(\d{4}-\d{2}-\d{2})?$",
                            "description": "Trading day as YYYY-MM-DD; empty or omitted for the most recent day"
                        }
                    },
                    "required": ["ticker", "infoType"]
                }),
            ),
            ToolKind::Dividends => (
                "Get the dividend history of a stock",
                json!({
                    "type": "object",
                    "properties": {
                        "ticker": {
                            "type": "string",
                            "description": "Stock ticker symbol, e.g. AAPL"
                        }
                    },
                    "required": ["ticker"]
                }),
            ),
            ToolKind::EtfHoldings => (
                "Get the constituent holdings of an ETF and their weights",
                json!({
                    "type": "object",
                    "properties": {
                        "ticker": {
                            "type": "string",
                            "description": "ETF ticker symbol, e.g. QQQ"
                        }
                    },
                    "required": ["ticker"]
                }),
            ),
            ToolKind::ExchangeRate => (
                "Get the realtime exchange rate between two currencies, fiat or crypto",
                json!({
                    "type": "object",
                    "properties": {
                        "fromCurrency": {
                            "type": "string",
                            "description": "Currency to convert from, e.g. USD or BTC"
                        },
                        "toCurrency": {
                            "type": "string",
                            "description": "Currency to convert to, e.g. EUR"
                        }
                    },
                    "required": ["fromCurrency", "toCurrency"]
                }),
            ),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    ToolKind::ALL.iter().map(ToolKind::definition).collect()
}
