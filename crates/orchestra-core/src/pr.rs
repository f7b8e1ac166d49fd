//! Branch, commit and pull-request creation behind a narrow capability.
//!
//! Job routing never touches this module; only the `pr` command does.

use crate::error::{OrchestraError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub branch: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub base: String,
}

pub trait SourceControl {
    fn create_branch(&self, branch: &str) -> Result<()>;
    /// Stage everything and commit it.
    fn commit(&self, message: &str) -> Result<()>;
    /// Returns the PR URL (or whatever the host printed).
    fn open_pull_request(&self, pr: &PullRequest) -> Result<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrOutcome {
    pub branch: String,
    pub branch_created: bool,
    pub committed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PrOutcome {
    pub fn message(&self) -> String {
        match (&self.error, &self.url) {
            (Some(e), _) => format!("err: {e}"),
            (None, Some(url)) => format!("ok: {url}"),
            (None, None) => "ok: no PR output".to_string(),
        }
    }
}

/// Best effort: an existing branch and an empty commit are expected and
/// skipped; any other failure ends the attempt and is reported in the
/// outcome instead of returned.
pub fn create_pull_request(vcs: &dyn SourceControl, pr: &PullRequest) -> PrOutcome {
    let mut outcome = PrOutcome {
        branch: pr.branch.clone(),
        ..PrOutcome::default()
    };

    match vcs.create_branch(&pr.branch) {
        Ok(()) => outcome.branch_created = true,
        Err(e) => tracing::debug!(branch = %pr.branch, error = %e, "branch not created"),
    }

    match vcs.commit(&pr.title) {
        Ok(()) => outcome.committed = true,
        Err(e) if e.to_string().contains("nothing to commit") => {
            tracing::debug!("nothing to commit");
        }
        Err(e) => {
            outcome.error = Some(e.to_string());
            return outcome;
        }
    }

    match vcs.open_pull_request(pr) {
        Ok(url) => outcome.url = Some(url),
        Err(e) => outcome.error = Some(e.to_string()),
    }
    outcome
}

// ---------------------------------------------------------------------------
// git + gh
// ---------------------------------------------------------------------------

/// `git` for branches and commits, GitHub CLI `gh` for the pull request.
pub struct GitCli {
    pub root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn run(&self, program: &'static str, args: &[&str]) -> Result<String> {
        which::which(program).map_err(|_| OrchestraError::ProgramNotFound(program))?;
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            return Ok(stdout);
        }
        // git reports "nothing to commit" on stdout, most errors on stderr.
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = [stderr, stdout]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Err(OrchestraError::Command { program, message })
    }
}

impl SourceControl for GitCli {
    fn create_branch(&self, branch: &str) -> Result<()> {
        self.run("git", &["checkout", "-b", branch]).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run("git", &["add", "-A"])?;
        self.run("git", &["commit", "-m", message]).map(|_| ())
    }

    fn open_pull_request(&self, pr: &PullRequest) -> Result<String> {
        self.run(
            "gh",
            &[
                "pr",
                "create",
                "-B",
                pr.base.as_str(),
                "-H",
                pr.branch.as_str(),
                "-t",
                pr.title.as_str(),
                "-b",
                pr.body.as_str(),
            ],
        )
    }
}
