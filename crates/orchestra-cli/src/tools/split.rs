use super::{string_list, OrchestraTool};
use orchestra_core::{job, paths::Layout};

pub struct SplitTool;

impl OrchestraTool for SplitTool {
    fn name(&self) -> &str {
        "split"
    }

    fn description(&self) -> &str {
        "Split a plan into jobs. Input: array of titles; optional shared constraints and copy per index."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["titles"],
            "properties": {
                "titles": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                "constraints": { "type": "array", "items": { "type": "string" } },
                "copy": { "type": "array", "items": { "type": "string" } }
            }
        })
    }

    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        let titles = string_list(&args, "titles")?;
        if titles.is_empty() {
            return Err("missing required argument: titles".to_string());
        }
        let constraints = string_list(&args, "constraints")?;
        let copies = string_list(&args, "copy")?;

        let mut paths = Vec::with_capacity(titles.len());
        for job in job::split(&titles, &constraints, &copies) {
            let path = job.save(layout).map_err(|e| e.to_string())?;
            paths.push(path.display().to_string());
        }

        Ok(format!("ok: {} job(s) created\n{}", paths.len(), paths.join("\n")).into())
    }
}
