use super::OrchestraTool;
use orchestra_core::{io, paths::Layout};

pub struct ScaffoldTool;

impl OrchestraTool for ScaffoldTool {
    fn name(&self) -> &str {
        "scaffold"
    }

    fn description(&self) -> &str {
        "Ensure the .orchestra/ folders exist"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    fn call(&self, _args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        io::scaffold(layout).map_err(|e| e.to_string())?;
        Ok("ok: .orchestra ready".into())
    }
}
