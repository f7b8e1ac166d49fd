use crate::output::print_json;
use crate::remote;
use anyhow::{bail, Context};
use orchestra_core::config::{Config, WorkflowConfig};
use orchestra_core::error::WF_FOLDER_MISSING;
use orchestra_core::paths::Layout;
use orchestra_core::workflow::{self, parse_tags, ImportReport};
use orchestra_core::OrchestraError;

/// `wf import` arguments after clap parsing: `key=value` assignments plus
/// the tool-name flags.
#[derive(Debug, Default)]
pub struct ImportArgs {
    pub assignments: Vec<String>,
    pub server: Option<String>,
    pub import_tool: Option<String>,
    pub activate_tool: Option<String>,
    pub tag_tool: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
struct Target {
    folder: String,
    tags: String,
}

/// Pull `folder=` and `tags=` out of the positional assignments. Later
/// assignments win; unknown keys are rejected.
fn parse_assignments(assignments: &[String]) -> anyhow::Result<Target> {
    let mut folder = String::new();
    let mut tags = String::new();
    for arg in assignments {
        match arg.split_once('=') {
            Some(("folder", v)) => folder = v.to_string(),
            Some(("tags", v)) => tags = v.to_string(),
            _ => bail!("unexpected argument '{arg}' (expected folder=<path> or tags=<list>)"),
        }
    }
    if folder.is_empty() || tags.is_empty() {
        bail!("folder and tags are required");
    }
    Ok(Target { folder, tags })
}

fn apply_overrides(mut cfg: WorkflowConfig, args: &ImportArgs) -> WorkflowConfig {
    if let Some(s) = &args.server {
        cfg.server = s.clone();
    }
    if let Some(t) = &args.import_tool {
        cfg.import_tool = t.clone();
    }
    if let Some(t) = &args.activate_tool {
        cfg.activate_tool = t.clone();
    }
    if let Some(t) = &args.tag_tool {
        cfg.tag_tool = t.clone();
    }
    cfg
}

/// Check the folder, connect the configured backend, run the batch.
pub async fn run_import(
    layout: &Layout,
    folder: &str,
    tags: &[String],
    cfg: &WorkflowConfig,
) -> anyhow::Result<ImportReport> {
    workflow::check_folder(layout, folder)?;
    let tools = remote::connect(layout, cfg).await?;
    let report =
        workflow::import_folder(layout, folder, tags, cfg.max_files, tools.as_ref()).await;
    tools.close().await;
    Ok(report?)
}

pub fn run(layout: &Layout, args: ImportArgs, json: bool) -> anyhow::Result<()> {
    let target = parse_assignments(&args.assignments)?;
    let tags = parse_tags(&target.tags);
    let config = Config::load(layout).context("failed to load .orchestra/config.yaml")?;
    let cfg = apply_overrides(config.workflows, &args);

    let rt = tokio::runtime::Runtime::new()?;
    let report = match rt.block_on(run_import(layout, &target.folder, &tags, &cfg)) {
        Ok(report) => report,
        Err(e) => {
            if matches!(
                e.downcast_ref::<OrchestraError>(),
                Some(OrchestraError::FolderMissing(_))
            ) {
                println!("{WF_FOLDER_MISSING}");
            }
            return Err(e);
        }
    };

    if json {
        print_json(&report)?;
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}
