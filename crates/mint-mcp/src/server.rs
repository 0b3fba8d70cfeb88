//! Stdio JSON-RPC 2.0 server loop
//!
//! Speaks the MCP wire format: one JSON-RPC message per line on stdin, one
//! response per line on stdout. Requests without an id are notifications
//! and get no response. Everything else is answered, even when the tool
//! behind it fails.

use mint_tools::ToolRegistry;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Newline-delimited JSON-RPC server over a tool registry
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server over a registry of tools
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Read requests line by line until the reader closes
    ///
    /// The writer is flushed after every response so a client that waits
    /// for a reply line never deadlocks against buffering.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let payload = serde_json::to_string(&response)?;
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one incoming line; `None` means no response is owed
    async fn handle_line(&self, line: &str) -> Option<Value> {
        let request: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(error_response(
                    Value::Null,
                    -32700,
                    &format!("Parse error: {e}"),
                ));
            }
        };

        let method = request
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        // A message without an id is a notification
        let Some(id) = request.get("id").cloned().filter(|id| !id.is_null()) else {
            debug!("Ignoring notification: {method}");
            return None;
        };

        debug!("Handling request: {method}");
        let result = match method.as_str() {
            "initialize" => self.initialize(),
            "tools/list" => self.list_tools(),
            "tools/call" => {
                let params = request.get("params").cloned().unwrap_or_else(|| json!({}));
                self.call_tool(params).await
            }
            _ => {
                return Some(error_response(
                    id,
                    -32601,
                    &format!("Method not found: {method}"),
                ));
            }
        };

        Some(json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result,
        }))
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
            }
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .list_tools()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.input_schema(),
                })
            })
            .collect();

        json!({ "tools": tools })
    }

    /// Dispatch a `tools/call` request
    ///
    /// Tool failures are not protocol errors: the failure travels back as
    /// the standard error envelope in the tool content with `isError` set,
    /// so the calling model can read the reason.
    async fn call_tool(&self, params: Value) -> Value {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let Some(tool) = self.registry.get(name) else {
            let envelope = json!({
                "status": "error",
                "error": format!("Unknown tool: {name}"),
                "tool": name,
            });
            return tool_content(&envelope, true);
        };

        match tool.execute(arguments).await {
            Ok(value) => tool_content(&value, false),
            Err(e) => {
                let envelope = json!({
                    "status": "error",
                    "error": e.to_string(),
                    "tool": name,
                });
                tool_content(&envelope, true)
            }
        }
    }
}

/// Wrap a payload as MCP text content
fn tool_content(payload: &Value, is_error: bool) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": payload.to_string(),
        }],
        "isError": is_error,
    })
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message,
        }
    })
}
