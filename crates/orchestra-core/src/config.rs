use crate::error::Result;
use crate::paths::Layout;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WorkflowConfig
// ---------------------------------------------------------------------------

pub const DEFAULT_MAX_FILES: usize = 200;

/// Which external MCP server and tool names the workflow loader talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_import_tool")]
    pub import_tool: String,
    #[serde(default = "default_activate_tool")]
    pub activate_tool: String,
    #[serde(default = "default_tag_tool")]
    pub tag_tool: String,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_server() -> String {
    "n8n-mcp".to_string()
}

fn default_import_tool() -> String {
    "workflows.import".to_string()
}

fn default_activate_tool() -> String {
    "workflows.activate".to_string()
}

fn default_tag_tool() -> String {
    "workflows.tag".to_string()
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            import_tool: default_import_tool(),
            activate_tool: default_activate_tool(),
            tag_tool: default_tag_tool(),
            max_files: default_max_files(),
        }
    }
}

// ---------------------------------------------------------------------------
// PrConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrConfig {
    #[serde(default = "default_base")]
    pub base: String,
}

fn default_base() -> String {
    "main".to_string()
}

impl Default for PrConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workflows: WorkflowConfig,
    #[serde(default)]
    pub pr: PrConfig,
}

impl Config {
    /// Load `.orchestra/config.yaml`; a missing file means all defaults.
    pub fn load(layout: &Layout) -> Result<Self> {
        if !layout.config_file.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&layout.config_file)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }
}
