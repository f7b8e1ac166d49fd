use super::{required_str, OrchestraTool};
use orchestra_core::paths::Layout;
use orchestra_core::plan::{Budgets, Plan};

pub struct PlanTool;

impl OrchestraTool for PlanTool {
    fn name(&self) -> &str {
        "plan"
    }

    fn description(&self) -> &str {
        "Create or overwrite .orchestra/plan.json from a goal string"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["goal"],
            "properties": {
                "goal": { "type": "string" },
                "budgets": {
                    "type": "object",
                    "properties": {
                        "lcp_ms": { "type": "number" },
                        "cls": { "type": "number" },
                        "lighthouse_min": { "type": "number" }
                    }
                }
            }
        })
    }

    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        let goal = required_str(&args, "goal")?;
        let budgets: Option<Budgets> = match args.get("budgets") {
            None | Some(serde_json::Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value(v.clone()).map_err(|e| format!("invalid budgets: {e}"))?,
            ),
        };

        Plan::new(goal, budgets)
            .save(layout)
            .map_err(|e| e.to_string())?;
        Ok("ok: plan.json written".into())
    }
}
