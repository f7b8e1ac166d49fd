use crate::output::print_json;
use orchestra_core::config::Config;
use orchestra_core::paths::Layout;
use orchestra_core::pr::{create_pull_request, GitCli, PullRequest};

/// Best effort: failures are printed, never returned.
pub fn run(
    layout: &Layout,
    branch: String,
    title: String,
    body: String,
    base: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let base = match base {
        Some(b) => b,
        None => Config::load(layout)?.pr.base,
    };
    let request = PullRequest {
        branch,
        title,
        body,
        base,
    };
    let outcome = create_pull_request(&GitCli::new(layout.root.clone()), &request);

    if json {
        print_json(&outcome)?;
    } else {
        println!("{}", outcome.message());
    }
    Ok(())
}
