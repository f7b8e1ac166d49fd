use crate::output::{print_json, print_table};
use anyhow::Context;
use orchestra_core::{job, paths::Layout};

pub fn run(
    layout: &Layout,
    titles: &[String],
    constraints: &[String],
    copies: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let jobs = job::split(titles, constraints, copies);
    let mut rows = Vec::with_capacity(jobs.len());
    for job in &jobs {
        let path = job
            .save(layout)
            .with_context(|| format!("failed to write job for '{}'", job.title))?;
        rows.push(vec![
            job.role.to_string(),
            job.branch.clone(),
            layout.relative(&path),
        ]);
    }

    if json {
        print_json(&jobs)?;
    } else {
        println!("ok: {} job(s) created", jobs.len());
        print_table(&["ROLE", "BRANCH", "PATH"], &rows);
    }
    Ok(())
}
