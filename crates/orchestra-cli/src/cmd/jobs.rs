use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use orchestra_core::{job::Job, paths::Layout};

#[derive(Subcommand)]
pub enum JobsSubcommand {
    /// List every job file
    List,
    /// Show one job by branch (e.g. fix/login-crash)
    Show { branch: String },
}

pub fn run(layout: &Layout, subcmd: JobsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        JobsSubcommand::List => list(layout, json),
        JobsSubcommand::Show { branch } => show(layout, &branch, json),
    }
}

fn list(layout: &Layout, json: bool) -> anyhow::Result<()> {
    let jobs = Job::list(layout).context("failed to list jobs")?;

    if json {
        return print_json(&jobs);
    }
    if jobs.is_empty() {
        println!("No jobs.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|j| vec![j.branch.clone(), j.role.to_string(), j.title.clone()])
        .collect();
    print_table(&["BRANCH", "ROLE", "TITLE"], &rows);
    Ok(())
}

fn show(layout: &Layout, branch: &str, json: bool) -> anyhow::Result<()> {
    let job = Job::load(layout, branch)?;

    if json {
        return print_json(&job);
    }
    println!("{}  [{}]", job.title, job.role);
    println!("id:     {}", job.id);
    println!("branch: {}", job.branch);
    if let Some(origin) = &job.slash_origin {
        println!("from:   /{} {}", origin.command, origin.action);
    }
    print_list("files", &job.inputs.files);
    print_list("constraints", &job.inputs.constraints);
    if !job.inputs.copy.is_empty() {
        println!("copy:   {}", job.inputs.copy);
    }
    print_list("assets", &job.inputs.assets);
    print_list("done when", &job.done_when);
    Ok(())
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{label}:");
    for item in items {
        println!("  - {item}");
    }
}
