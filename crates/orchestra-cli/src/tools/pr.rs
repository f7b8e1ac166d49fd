use super::{required_str, OrchestraTool};
use orchestra_core::config::Config;
use orchestra_core::paths::Layout;
use orchestra_core::pr::{create_pull_request, GitCli, PullRequest};

pub struct PrTool;

impl OrchestraTool for PrTool {
    fn name(&self) -> &str {
        "pr"
    }

    fn description(&self) -> &str {
        "Optional. Create a branch, commit all changes, and open a PR with the GitHub CLI."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["branch", "title"],
            "properties": {
                "branch": { "type": "string" },
                "title": { "type": "string" },
                "body": { "type": "string" },
                "base": { "type": "string", "description": "Base branch (default from config, else main)" }
            }
        })
    }

    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        let branch = required_str(&args, "branch")?;
        let title = required_str(&args, "title")?;
        let base = match args["base"].as_str() {
            Some(b) => b.to_string(),
            None => Config::load(layout).map_err(|e| e.to_string())?.pr.base,
        };
        let request = PullRequest {
            branch: branch.to_string(),
            title: title.to_string(),
            body: args["body"].as_str().unwrap_or_default().to_string(),
            base,
        };

        let outcome = create_pull_request(&GitCli::new(layout.root.clone()), &request);
        Ok(outcome.message().into())
    }
}
