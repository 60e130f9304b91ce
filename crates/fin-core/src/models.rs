//! Response models for the Alpha Vantage endpoints
//!
//! Values are kept as the literal strings the API sends. Nothing here parses
//! prices or rounds them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Which OHLCV field to read from a daily bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoType {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl InfoType {
    pub const ALL: [InfoType; 5] = [
        InfoType::Open,
        InfoType::Close,
        InfoType::High,
        InfoType::Low,
        InfoType::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::Open => "open",
            InfoType::High => "high",
            InfoType::Low => "low",
            InfoType::Close => "close",
            InfoType::Volume => "volume",
        }
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(InfoType::Open),
            "high" => Ok(InfoType::High),
            "low" => Ok(InfoType::Low),
            "close" => Ok(InfoType::Close),
            "volume" => Ok(InfoType::Volume),
            other => Err(format!("Invalid infoType: {}", other)),
        }
    }
}

/// One day of `TIME_SERIES_DAILY`
///
/// Missing fields read as empty so one incomplete day does not spoil the
/// whole series.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open", default, deserialize_with = "literal")]
    pub open: String,
    #[serde(rename = "2. high", default, deserialize_with = "literal")]
    pub high: String,
    #[serde(rename = "3. low", default, deserialize_with = "literal")]
    pub low: String,
    #[serde(rename = "4. close", default, deserialize_with = "literal")]
    pub close: String,
    #[serde(rename = "5. volume", default, deserialize_with = "literal")]
    pub volume: String,
}

impl DailyBar {
    pub fn get(&self, info_type: InfoType) -> &str {
        match info_type {
            InfoType::Open => &self.open,
            InfoType::High => &self.high,
            InfoType::Low => &self.low,
            InfoType::Close => &self.close,
            InfoType::Volume => &self.volume,
        }
    }
}

/// The `Time Series (Daily)` object, keyed by `YYYY-MM-DD`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TimeSeriesDaily {
    bars: BTreeMap<String, DailyBar>,
}

impl TimeSeriesDaily {
    pub fn new(bars: BTreeMap<String, DailyBar>) -> Self {
        Self { bars }
    }

    pub fn get(&self, date: &str) -> Option<&DailyBar> {
        self.bars.get(date)
    }

    /// Most recent trading day present in the series
    ///
    /// Alpha Vantage lists days newest first, but the choice is made by date
    /// value here rather than by position. Keys that are not valid dates are
    /// ignored.
    pub fn latest_date(&self) -> Option<&str> {
        self.bars
            .keys()
            .filter_map(|key| {
                NaiveDate::parse_from_str(key, "%Y-%m-%d")
                    .ok()
                    .map(|date| (date, key.as_str()))
            })
            .max_by_key(|(date, _)| *date)
            .map(|(_, key)| key)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// One entry of the `DIVIDENDS` `data` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DividendRecord {
    #[serde(default, deserialize_with = "literal")]
    pub ex_dividend_date: String,
    #[serde(default, deserialize_with = "literal")]
    pub amount: String,
    #[serde(default, deserialize_with = "literal")]
    pub declaration_date: String,
    #[serde(default, deserialize_with = "literal")]
    pub record_date: String,
    #[serde(default, deserialize_with = "literal")]
    pub payment_date: String,
}

/// One entry of the `ETF_PROFILE` `holdings` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holding {
    #[serde(default, deserialize_with = "literal")]
    pub symbol: String,
    #[serde(default, deserialize_with = "literal")]
    pub description: String,
    #[serde(default, deserialize_with = "literal")]
    pub weight: String,
}

/// The `Realtime Currency Exchange Rate` object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExchangeRate {
    #[serde(rename = "1. From_Currency Code", default, deserialize_with = "literal")]
    pub from_code: String,
    #[serde(rename = "2. From_Currency Name", default, deserialize_with = "literal")]
    pub from_name: String,
    #[serde(rename = "3. To_Currency Code", default, deserialize_with = "literal")]
    pub to_code: String,
    #[serde(rename = "4. To_Currency Name", default, deserialize_with = "literal")]
    pub to_name: String,
    #[serde(rename = "5. Exchange Rate", default, deserialize_with = "literal")]
    pub rate: String,
    #[serde(rename = "6. Last Refreshed", default, deserialize_with = "literal")]
    pub last_refreshed: String,
}

/// Accept a string verbatim, or the JSON text of any other scalar.
///
/// Alpha Vantage sends numbers as strings, but a bare number must not turn
/// into a parse failure.
fn literal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
