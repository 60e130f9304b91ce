//! MCP Server implementation
//!
//! Reads newline-delimited JSON-RPC messages from stdin and writes responses
//! to stdout. Tool calls are handed to the [`Dispatcher`].

use std::io::{BufRead, Write};

use serde_json::{Value, json};

use crate::handlers::Dispatcher;
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, InitializeResult, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolsCapability,
};
use crate::tools::{ToolDefinition, get_tool_definitions};
use crate::{Error, Result};

/// MCP Server for financial data lookups
///
/// # Example
///
/// ```ignore
/// use fin_core::{AlphaVantageClient, Config};
/// use fin_mcp::{Dispatcher, FinMcpServer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::load(None, None)?;
///     let dispatcher = Dispatcher::new(AlphaVantageClient::new(config));
///     FinMcpServer::new(dispatcher).run().await?;
///     Ok(())
/// }
/// ```
pub struct FinMcpServer {
    dispatcher: Dispatcher,

    /// Tools served by `tools/list`, empty until [`initialize`](Self::initialize)
    tools: Vec<ToolDefinition>,
}

impl FinMcpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            tools: Vec::new(),
        }
    }

    /// Load the tool registry
    pub fn initialize(&mut self) {
        tracing::info!(
            base_url = self.dispatcher.client().config().base_url(),
            "Initializing MCP server"
        );
        self.tools = get_tool_definitions();
    }

    /// Run the MCP server
    ///
    /// Serves until stdin closes. A message that fails to parse is answered
    /// with a JSON-RPC error and the loop continues.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize();

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!("MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(&line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Ok(_) => {} // No response needed (notifications)
                Err(e) => {
                    let error_response =
                        JsonRpcResponse::error(None, INTERNAL_ERROR, format!("Internal error: {}", e));
                    writeln!(stdout, "{}", serde_json::to_string(&error_response)?)?;
                    stdout.flush()?;
                }
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                let response =
                    JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id)?,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id)?,
            "tools/call" => match self.handle_tools_call(request.params).await {
                Ok(result) => JsonRpcResponse::success(request.id, result),
                Err(Error::InvalidParams(message)) => {
                    JsonRpcResponse::error(request.id, INVALID_PARAMS, message)
                }
                Err(e) => return Err(e),
            },
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "fin-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        Ok(JsonRpcResponse::success(id, json!({ "tools": self.tools })))
    }

    /// Handle tools/call request
    ///
    /// Tool failures come back inside the result with `isError: true`; only
    /// malformed params are an `Err`.
    async fn handle_tools_call(&self, params: Value) -> Result<Value> {
        let tool_params: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| Error::InvalidParams(format!("Invalid params: {}", e)))?;

        let result = self
            .dispatcher
            .invoke(&tool_params.name, tool_params.arguments)
            .await;

        Ok(serde_json::to_value(result)?)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }
}
