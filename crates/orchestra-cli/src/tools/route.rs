use super::{required_str, string_list, OrchestraTool};
use orchestra_core::{job::Job, paths::Layout, role};

pub struct RouteTool;

impl OrchestraTool for RouteTool {
    fn name(&self) -> &str {
        "route"
    }

    fn description(&self) -> &str {
        "Route a single task title to a role and branch, and emit a job file"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["title"],
            "properties": {
                "title": { "type": "string" },
                "constraints": { "type": "array", "items": { "type": "string" } },
                "copy": { "type": "string" }
            }
        })
    }

    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        let title = required_str(&args, "title")?;
        let constraints = string_list(&args, "constraints")?;
        let copy = args["copy"].as_str().unwrap_or_default();

        let job = Job::route(title, constraints, copy);
        let path = job.save(layout).map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "path": path.display().to_string(),
            "role": job.role,
            "branch": job.branch,
            "rule": role::classify(title).rule,
        }))
    }
}
