//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
///
/// Tool failures never show up here: they are reported inside a
/// [`ToolResult`](crate::ToolResult). These are protocol and startup errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the upstream client or configuration
    #[error("core error: {0}")]
    Core(#[from] fin_core::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request params did not match the method's shape
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
