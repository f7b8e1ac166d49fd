use crate::output::print_json;
use anyhow::Context;
use orchestra_core::{io, paths::Layout};

pub fn run(layout: &Layout, json: bool) -> anyhow::Result<()> {
    io::scaffold(layout)
        .with_context(|| format!("failed to create {}", layout.jobs_dir.display()))?;

    if json {
        print_json(&serde_json::json!({
            "status": "ok",
            "jobs_dir": layout.relative(&layout.jobs_dir),
        }))?;
    } else {
        println!("ok: .orchestra ready");
    }
    Ok(())
}
