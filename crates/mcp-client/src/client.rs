use serde_json::Value;

use crate::process::ServerProcess;
use crate::types::{JsonRpcRequest, JsonRpcResponse, ServerConfig, ToolCallResult};
use crate::{McpClientError, Result};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// One connected MCP server. Requests are strictly sequential.
pub struct McpClient {
    name: String,
    process: ServerProcess,
    next_id: u64,
}

impl McpClient {
    /// Spawn the server and complete the `initialize` handshake.
    pub async fn connect(name: impl Into<String>, config: &ServerConfig) -> Result<Self> {
        let process = ServerProcess::spawn(config)?;
        Self::handshake(name.into(), process).await
    }

    #[cfg(test)]
    pub(crate) async fn connect_command(
        name: &str,
        cmd: tokio::process::Command,
    ) -> Result<Self> {
        let process = ServerProcess::from_command(cmd)?;
        Self::handshake(name.to_string(), process).await
    }

    async fn handshake(name: String, process: ServerProcess) -> Result<Self> {
        let mut client = Self {
            name,
            process,
            next_id: 1,
        };
        let info = client
            .request(
                "initialize",
                serde_json::json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "orchestra",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            )
            .await?;
        tracing::debug!(server = %client.name, info = %info, "mcp server initialized");
        client.notify("notifications/initialized").await?;
        Ok(client)
    }

    async fn notify(&mut self, method: &str) -> Result<()> {
        let msg = JsonRpcRequest {
            jsonrpc: "2.0",
            id: None,
            method,
            params: None,
        };
        self.process.send(&serde_json::to_value(&msg)?).await
    }

    /// Send a request and wait for the response carrying the same id.
    /// Server notifications and unrelated lines in between are skipped.
    pub async fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        let msg = JsonRpcRequest {
            jsonrpc: "2.0",
            id: Some(id),
            method,
            params: Some(params),
        };
        self.process.send(&serde_json::to_value(&msg)?).await?;

        loop {
            let Some(raw) = self.process.next_value().await? else {
                let stderr = self.process.stderr();
                let msg = if stderr.is_empty() {
                    format!("server '{}' closed stdout before answering {method}", self.name)
                } else {
                    format!(
                        "server '{}' closed stdout before answering {method}\nstderr: {stderr}",
                        self.name
                    )
                };
                return Err(McpClientError::Process(msg));
            };
            let resp: JsonRpcResponse = match serde_json::from_value(raw) {
                Ok(r) => r,
                Err(_) => continue,
            };
            if !resp.answers(id) {
                continue;
            }
            if let Some(err) = resp.error {
                return Err(McpClientError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            return Ok(resp.result.unwrap_or(Value::Null));
        }
    }

    /// `tools/call`. A result flagged `isError` becomes [`McpClientError::Tool`].
    pub async fn call_tool(&mut self, tool: &str, arguments: Value) -> Result<Value> {
        let raw = self
            .request(
                "tools/call",
                serde_json::json!({ "name": tool, "arguments": arguments }),
            )
            .await?;
        let result: ToolCallResult = serde_json::from_value(raw)?;
        if result.is_error {
            return Err(McpClientError::Tool {
                tool: tool.to_string(),
                message: result.text(),
            });
        }
        Ok(result.into_value())
    }

    /// Close the server's stdin and wait for it to exit. Later calls fail
    /// with [`McpClientError::Process`].
    pub async fn close(&mut self) {
        self.process.shutdown().await;
    }
}
