use orchestra_core::paths::Layout;
use std::future::Future;

pub mod import_workflows;
pub mod plan;
pub mod pr;
pub mod route;
pub mod scaffold;
pub mod slash;
pub mod split;

/// One MCP tool. A returned string becomes the text content as-is; any other
/// value is sent pretty-printed. `Err` becomes an `isError` result.
pub trait OrchestraTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String>;
}

/// Tools served by `orchestra mcp`.
pub fn orchestra_tools() -> Vec<Box<dyn OrchestraTool>> {
    vec![
        Box::new(scaffold::ScaffoldTool),
        Box::new(plan::PlanTool),
        Box::new(split::SplitTool),
        Box::new(route::RouteTool),
        Box::new(slash::SlashTool),
        Box::new(pr::PrTool),
    ]
}

/// Tools served by `wf mcp`.
pub fn workflow_tools() -> Vec<Box<dyn OrchestraTool>> {
    vec![Box::new(import_workflows::ImportWorkflowsTool)]
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

pub(crate) fn required_str<'a>(args: &'a serde_json::Value, key: &str) -> Result<&'a str, String> {
    args[key]
        .as_str()
        .ok_or_else(|| format!("missing required argument: {key}"))
}

/// Optional array of strings; non-string items are rejected.
pub(crate) fn string_list(args: &serde_json::Value, key: &str) -> Result<Vec<String>, String> {
    match &args[key] {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("argument '{key}' must contain only strings"))
            })
            .collect(),
        _ => Err(format!("argument '{key}' must be an array of strings")),
    }
}

/// Run `fut` to completion from synchronous tool code, inside or outside a
/// tokio runtime.
pub(crate) fn block_on<F: Future>(fut: F) -> Result<F::Output, String> {
    match tokio::runtime::Handle::try_current() {
        Ok(_) => Ok(tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(fut)
        })),
        Err(_) => {
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| format!("failed to create tokio runtime: {e}"))?;
            Ok(rt.block_on(fut))
        }
    }
}
