use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use orchestra_core::paths::Layout;
use orchestra_core::workflow::{append_report_entry, read_report, ImportReportEntry};

#[derive(Subcommand)]
pub enum ReportSubcommand {
    /// Append one JSON entry to the import report
    Append {
        /// Entry as JSON: {"file", "workflowId", "action", "activated", "tags", "error"?}
        entry: String,
    },
    /// Print the import report
    Show,
}

pub fn run(layout: &Layout, subcmd: ReportSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ReportSubcommand::Append { entry } => append(layout, &entry),
        ReportSubcommand::Show => show(layout, json),
    }
}

fn append(layout: &Layout, raw: &str) -> anyhow::Result<()> {
    let entry: ImportReportEntry =
        serde_json::from_str(raw).context("report entry is not a valid JSON entry")?;
    let total = append_report_entry(layout, entry).context("failed to update import report")?;
    tracing::debug!(total, "report entry appended");
    println!("ok");
    Ok(())
}

fn show(layout: &Layout, json: bool) -> anyhow::Result<()> {
    let entries = read_report(layout).context("failed to read import report")?;

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("Import report is empty.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.file.clone(),
                e.action.as_str().to_string(),
                e.workflow_id.clone(),
                if e.activated { "yes" } else { "no" }.to_string(),
                e.error.clone().unwrap_or_else(|| e.tags.join(",")),
            ]
        })
        .collect();
    print_table(&["FILE", "ACTION", "WORKFLOW", "ACTIVE", "TAGS/ERROR"], &rows);
    Ok(())
}
