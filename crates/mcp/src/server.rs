// MCP server: JSON-RPC dispatch over the tool registry

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, JSONRPC_VERSION, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

pub const SERVER_NAME: &str = "HK OpenAI Health Server";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Parse one raw JSON-RPC message and dispatch it.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        self.handle_bytes(raw.as_bytes()).await
    }

    /// Like `handle_message`, for input that may not be valid UTF-8.
    pub async fn handle_bytes(&self, raw: &[u8]) -> Option<JsonRpcResponse> {
        let value: serde_json::Value = match serde_json::from_slice(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Message is not a JSON-RPC request");
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
            }
        };

        self.handle_request(request).await
    }

    /// Dispatch a request. Notifications yield `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(serde_json::Value::Null);
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        debug!(method = %request.method, "Request received");
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params for initialize: {}", e)))?
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params for initialize"))?;

        info!(
            client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
            protocol = %params.protocol_version,
            "Client initializing"
        );

        to_value(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    fn list_tools(&self) -> Result<serde_json::Value, JsonRpcError> {
        to_value(ListToolsResult {
            tools: self.registry.list_schemas(),
        })
    }

    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let params: CallToolParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params for tools/call: {}", e)))?
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        info!(tool = %params.name, "Calling tool");
        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                error!(tool = %params.name, error = %format!("{:#}", e), "Tool execution failed");
                CallToolResult::error(format!("{:#}", e))
            }
        };

        to_value(result)
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            if let Some(response) = self.handle_bytes(&line).await {
                let mut json = serde_json::to_string(&response)?;
                json.push('\n');
                writer.write_all(json.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Serve over the process's stdin/stdout.
    pub async fn serve_stdio(&self) -> Result<()> {
        info!(tools = self.registry.len(), "MCP server listening on stdio");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}

fn to_value(value: impl serde::Serialize) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
