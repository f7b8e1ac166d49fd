use super::{block_on, required_str, OrchestraTool};
use crate::cmd::import;
use orchestra_core::config::{Config, WorkflowConfig};
use orchestra_core::paths::Layout;
use orchestra_core::workflow::{parse_tags, NO_FILES_MESSAGE};
use orchestra_core::OrchestraError;

pub struct ImportWorkflowsTool;

impl ImportWorkflowsTool {
    /// Config file values, overridden by `mcp_server` and the `tools` map.
    fn workflow_config(
        args: &serde_json::Value,
        layout: &Layout,
    ) -> Result<WorkflowConfig, String> {
        let mut cfg = Config::load(layout).map_err(|e| e.to_string())?.workflows;
        if let Some(server) = args["mcp_server"].as_str() {
            cfg.server = server.to_string();
        }
        let tools = &args["tools"];
        if let Some(t) = tools["importTool"].as_str() {
            cfg.import_tool = t.to_string();
        }
        if let Some(t) = tools["activateTool"].as_str() {
            cfg.activate_tool = t.to_string();
        }
        if let Some(t) = tools["tagTool"].as_str() {
            cfg.tag_tool = t.to_string();
        }
        Ok(cfg)
    }
}

impl OrchestraTool for ImportWorkflowsTool {
    fn name(&self) -> &str {
        "import_workflows"
    }

    fn description(&self) -> &str {
        "Import, activate, and tag n8n workflows from a folder"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["folder", "tags"],
            "properties": {
                "folder": { "type": "string", "description": "Relative folder path containing workflow JSON files" },
                "tags": { "type": "string", "description": "Comma-separated tags" },
                "mcp_server": { "type": "string", "description": "MCP server name", "default": "n8n-mcp" },
                "tools": {
                    "type": "object",
                    "description": "Optional override mapping for tool names",
                    "properties": {
                        "importTool": { "type": "string", "default": "workflows.import" },
                        "activateTool": { "type": "string", "default": "workflows.activate" },
                        "tagTool": { "type": "string", "default": "workflows.tag" }
                    }
                }
            }
        })
    }

    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        let folder = required_str(&args, "folder")?;
        let tags = parse_tags(required_str(&args, "tags")?);
        let cfg = Self::workflow_config(&args, layout)?;

        let report = match block_on(import::run_import(layout, folder, &tags, &cfg))? {
            Ok(report) => report,
            Err(e) => {
                return match e.downcast_ref::<OrchestraError>() {
                    Some(missing @ OrchestraError::FolderMissing(_)) => {
                        Ok(missing.to_string().into())
                    }
                    _ => Err(format!("{e:#}")),
                };
            }
        };

        if report.entries.is_empty() {
            return Ok(NO_FILES_MESSAGE.into());
        }
        Ok(format!(
            "{}\nReport written to: {}",
            report.summary(),
            layout.relative(&layout.report_file)
        )
        .into())
    }
}
