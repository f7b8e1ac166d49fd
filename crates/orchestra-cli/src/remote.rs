//! Workflow tool backends: an MCP server from `.mcp.json`, or the simulated
//! tools when the configured server is not registered.

use anyhow::Context;
use async_trait::async_trait;
use mcp_client::{McpClient, Registry};
use orchestra_core::config::WorkflowConfig;
use orchestra_core::paths::Layout;
use orchestra_core::workflow::{
    ActivateResult, ImportMode, ImportResult, SimulatedTools, TagResult, WorkflowTools,
};
use orchestra_core::{OrchestraError, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// [`WorkflowTools`] backed by a live MCP server. Calls are serialized over
/// the single stdio connection.
pub struct McpWorkflowTools {
    client: Mutex<McpClient>,
    import_tool: String,
    activate_tool: String,
    tag_tool: String,
}

impl McpWorkflowTools {
    pub fn new(client: McpClient, config: &WorkflowConfig) -> Self {
        Self {
            client: Mutex::new(client),
            import_tool: config.import_tool.clone(),
            activate_tool: config.activate_tool.clone(),
            tag_tool: config.tag_tool.clone(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, tool: &str, args: Value) -> Result<T> {
        let value = {
            let mut client = self.client.lock().await;
            client
                .call_tool(tool, args)
                .await
                .map_err(|e| OrchestraError::tool(tool, e.to_string()))?
        };
        serde_json::from_value(value)
            .map_err(|e| OrchestraError::tool(tool, format!("unexpected response: {e}")))
    }
}

#[async_trait]
impl WorkflowTools for McpWorkflowTools {
    async fn import(&self, payload: &str, mode: ImportMode) -> Result<ImportResult> {
        self.call(
            &self.import_tool,
            json!({ "payload": payload, "mode": mode.as_str() }),
        )
        .await
    }

    async fn activate(&self, id: &str) -> Result<ActivateResult> {
        self.call(&self.activate_tool, json!({ "id": id })).await
    }

    async fn tag(&self, id: &str, tags: &[String]) -> Result<TagResult> {
        self.call(&self.tag_tool, json!({ "id": id, "tags": tags }))
            .await
    }

    async fn close(&self) {
        self.client.lock().await.close().await;
    }
}

/// Connect to `config.server` as registered in the layout's `.mcp.json`.
/// An unregistered server falls back to [`SimulatedTools`] with a warning.
pub async fn connect(
    layout: &Layout,
    config: &WorkflowConfig,
) -> anyhow::Result<Box<dyn WorkflowTools>> {
    let registry = Registry::load(&layout.mcp_registry)
        .with_context(|| format!("failed to read {}", layout.mcp_registry.display()))?;

    let Some(server) = registry.get(&config.server) else {
        tracing::warn!(
            server = %config.server,
            "server not registered in .mcp.json; using simulated workflow tools"
        );
        return Ok(Box::new(SimulatedTools));
    };

    let mut server = server.clone();
    if server.cwd.is_none() {
        server.cwd = Some(layout.root.clone());
    }
    let client = McpClient::connect(config.server.clone(), &server)
        .await
        .with_context(|| format!("failed to start MCP server '{}'", config.server))?;
    tracing::info!(server = %config.server, "connected to workflow server");
    Ok(Box::new(McpWorkflowTools::new(client, config)))
}
