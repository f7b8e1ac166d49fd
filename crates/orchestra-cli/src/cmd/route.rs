use crate::output::print_json;
use anyhow::Context;
use orchestra_core::{job::Job, paths::Layout, role};

pub fn run(
    layout: &Layout,
    title: &str,
    constraints: Vec<String>,
    copy: &str,
    json: bool,
) -> anyhow::Result<()> {
    let matched = role::classify(title);
    let job = Job::route(title, constraints, copy);
    let path = job.save(layout).context("failed to write job file")?;

    if json {
        print_json(&serde_json::json!({
            "path": layout.relative(&path),
            "rule": matched.rule,
            "job": job,
        }))?;
    } else {
        println!("role:   {}", job.role);
        println!("branch: {}", job.branch);
        println!("rule:   {}", matched.rule.unwrap_or("default"));
        println!("path:   {}", layout.relative(&path));
    }
    Ok(())
}
