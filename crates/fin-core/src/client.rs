//! Alpha Vantage HTTP client
//!
//! Every lookup is a single `GET <base_url>/query?function=...`. The client
//! never retries and never caches; each call stands alone.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{DividendRecord, ExchangeRate, Holding, TimeSeriesDaily};
use crate::{Config, Error, Result};

const TIME_SERIES_KEY: &str = "Time Series (Daily)";
const DIVIDENDS_KEY: &str = "data";
const HOLDINGS_KEY: &str = "holdings";
const EXCHANGE_RATE_KEY: &str = "Realtime Currency Exchange Rate";

/// Top-level keys Alpha Vantage uses to report a problem instead of data
const ADVISORY_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Client for the Alpha Vantage `/query` endpoint
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    http: Client,
    config: Config,
}

impl AlphaVantageClient {
    pub fn new(config: Config) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    /// Use a preconfigured `reqwest::Client`
    pub fn with_http_client(http: Client, config: Config) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full daily history for `symbol` (`TIME_SERIES_DAILY`, `outputsize=full`)
    ///
    /// A body without the time-series object is an error, carrying the
    /// upstream advisory text when there is one.
    pub async fn daily_time_series(&self, symbol: &str) -> Result<TimeSeriesDaily> {
        let body = self
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", "full"),
            ])
            .await?;

        match extract(&body, TIME_SERIES_KEY)? {
            Some(series) => Ok(series),
            None => Err(advisory(&body)
                .map(|message| Error::Upstream { message })
                .unwrap_or(Error::MissingField {
                    field: TIME_SERIES_KEY,
                })),
        }
    }

    /// Dividend history for `symbol`, `None` when the body carries no `data`
    pub async fn dividends(&self, symbol: &str) -> Result<Option<Vec<DividendRecord>>> {
        let body = self
            .query(&[("function", "DIVIDENDS"), ("symbol", symbol)])
            .await?;
        extract_or_note(&body, DIVIDENDS_KEY)
    }

    /// ETF holdings for `symbol`, `None` when the body carries no `holdings`
    pub async fn etf_holdings(&self, symbol: &str) -> Result<Option<Vec<Holding>>> {
        let body = self
            .query(&[("function", "ETF_PROFILE"), ("symbol", symbol)])
            .await?;
        extract_or_note(&body, HOLDINGS_KEY)
    }

    /// Realtime rate between two currency codes, fiat or crypto
    ///
    /// `None` when the rate object, or the rate inside it, is missing.
    pub async fn exchange_rate(&self, from: &str, to: &str) -> Result<Option<ExchangeRate>> {
        let body = self
            .query(&[
                ("function", "CURRENCY_EXCHANGE_RATE"),
                ("from_currency", from),
                ("to_currency", to),
            ])
            .await?;
        let rate: Option<ExchangeRate> = extract_or_note(&body, EXCHANGE_RATE_KEY)?;
        Ok(rate.filter(|r| !r.rate.is_empty()))
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/query", self.config.base_url());
        tracing::debug!(?params, "Querying Alpha Vantage");

        // Errors are stripped of their URL, it contains the API key.
        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apikey", self.config.api_key())])
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Deserialize `body[key]`, `None` if the key is absent or null
fn extract<T: DeserializeOwned>(body: &Value, key: &str) -> Result<Option<T>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(T::deserialize(value)?)),
    }
}

fn extract_or_note<T: DeserializeOwned>(body: &Value, key: &str) -> Result<Option<T>> {
    let found = extract(body, key)?;
    if found.is_none() {
        if let Some(message) = advisory(body) {
            tracing::warn!(field = key, %message, "Upstream returned an advisory instead of data");
        }
    }
    Ok(found)
}

fn advisory(body: &Value) -> Option<String> {
    ADVISORY_KEYS
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
