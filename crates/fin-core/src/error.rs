//! Error types for fin-core

use std::path::PathBuf;

/// Result type for fin-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fin-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key was configured
    #[error("Alpha Vantage API key is not set (set ALPHA_VANTAGE_API_KEY or api_key in the config file)")]
    MissingApiKey,

    /// Configuration file not found at the given path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The request never produced a response (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Upstream reported a problem in place of data (throttling, bad symbol)
    #[error("{message}")]
    Upstream { message: String },

    /// An expected top-level field was absent from the response
    #[error("Response is missing '{field}'")]
    MissingField { field: &'static str },

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
