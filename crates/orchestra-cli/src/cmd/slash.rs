use crate::output::print_json;
use anyhow::Context;
use orchestra_core::{job::Job, paths::Layout, OrchestraError};

pub fn run(layout: &Layout, input: &str, json: bool) -> anyhow::Result<()> {
    let job =
        Job::from_slash(input).ok_or_else(|| OrchestraError::NotSlashCommand(input.to_string()))?;
    let path = job.save(layout).context("failed to write job file")?;

    if json {
        print_json(&job)?;
    } else {
        println!("ok: {}", layout.relative(&path));
        println!("title:  {}", job.title);
        println!("role:   {}", job.role);
        println!("branch: {}", job.branch);
        for c in &job.inputs.constraints {
            println!("  - {c}");
        }
    }
    Ok(())
}
