use crate::branch::branch_for;
use crate::error::{OrchestraError, Result};
use crate::io;
use crate::paths::Layout;
use crate::role::{infer_role, Role};
use crate::slash::{expand_slash_command, parse_slash_command, SlashCommand};
use crate::slug::MAX_SLUG_LEN;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use walkdir::WalkDir;

pub const DONE_WHEN: [&str; 3] = ["tests pass", "lighthouse ok", "review checklist ticked"];

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInputs {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub copy: String,
    #[serde(default)]
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub role: Role,
    pub title: String,
    pub inputs: JobInputs,
    pub done_when: Vec<String>,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slash_origin: Option<SlashCommand>,
}

impl Job {
    /// Classify `title`, name its branch and attach the fixed checklist.
    pub fn build(id: impl Into<String>, title: impl Into<String>, inputs: JobInputs) -> Self {
        let title = title.into();
        let role = infer_role(&title);
        let branch = branch_for(&title, role);
        Self {
            id: id.into(),
            role,
            title,
            inputs,
            done_when: DONE_WHEN.iter().map(|s| s.to_string()).collect(),
            branch,
            slash_origin: None,
        }
    }

    /// Single job with a fresh process-unique id.
    pub fn route(title: &str, constraints: Vec<String>, copy: impl Into<String>) -> Self {
        Self::build(
            next_job_id(),
            title,
            JobInputs {
                constraints,
                copy: copy.into(),
                ..JobInputs::default()
            },
        )
    }

    /// Expand a `/command action` line into a job. `None` when `line` is not a
    /// slash command.
    pub fn from_slash(line: &str) -> Option<Self> {
        let cmd = parse_slash_command(line)?;
        let expanded = expand_slash_command(&cmd);
        let inputs = JobInputs {
            files: expanded.files.unwrap_or_default(),
            constraints: expanded.constraints,
            copy: expanded.copy,
            assets: expanded.assets.unwrap_or_default(),
        };
        let mut job = Self::build(next_job_id(), expanded.title, inputs);
        job.slash_origin = Some(cmd);
        Some(job)
    }

    pub fn path(&self, layout: &Layout) -> PathBuf {
        layout.job_path(&self.branch)
    }

    /// Write `{jobs_dir}/{branch}.json`, replacing any job on the same branch.
    pub fn save(&self, layout: &Layout) -> Result<PathBuf> {
        let path = self.path(layout);
        io::write_json(&path, self)?;
        Ok(path)
    }

    pub fn load(layout: &Layout, branch: &str) -> Result<Self> {
        let path = layout.job_path(branch);
        if !path.is_file() {
            return Err(OrchestraError::JobNotFound(branch.to_string()));
        }
        io::read_json(&path)
    }

    /// All job files under the jobs directory, sorted by branch.
    pub fn list(layout: &Layout) -> Result<Vec<Job>> {
        if !layout.jobs_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut jobs = Vec::new();
        for entry in WalkDir::new(&layout.jobs_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "json") {
                jobs.push(io::read_json::<Job>(path)?);
            }
        }
        jobs.sort_by(|a, b| a.branch.cmp(&b.branch));
        Ok(jobs)
    }
}

// ---------------------------------------------------------------------------
// Batch creation
// ---------------------------------------------------------------------------

/// One job per title. Every job shares `constraints` (blank entries dropped);
/// `copies[i]` goes to the i-th job. Ids share one timestamp and carry the
/// index, so they stay distinct even when the clock does not move.
///
/// Branches are unique within the batch: a title landing on a branch already
/// taken gets the first free `-2`, `-3`, ... suffix, so every job has its own file.
pub fn split(titles: &[String], constraints: &[String], copies: &[String]) -> Vec<Job> {
    let stamp = next_stamp();
    let shared: Vec<String> = constraints
        .iter()
        .filter(|c| !c.is_empty())
        .cloned()
        .collect();

    let mut taken = HashSet::with_capacity(titles.len());
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let mut job = Job::build(
                format!("job-{stamp}-{i}"),
                title.as_str(),
                JobInputs {
                    constraints: shared.clone(),
                    copy: copies.get(i).cloned().unwrap_or_default(),
                    ..JobInputs::default()
                },
            );
            job.branch = free_branch(&job.branch, &taken);
            taken.insert(job.branch.clone());
            job
        })
        .collect()
}

/// `branch` itself when unused, else `{prefix}/{slug}-{n}` for the smallest
/// free `n >= 2`, with the slug cut so it stays within the slug length limit.
fn free_branch(branch: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(branch) {
        return branch.to_string();
    }
    let (prefix, slug) = branch.split_once('/').unwrap_or(("", branch));
    let mut n = 2usize;
    loop {
        let suffix = format!("-{n}");
        let keep = slug.len().min(MAX_SLUG_LEN.saturating_sub(suffix.len()));
        let candidate = format!("{prefix}/{}{suffix}", slug[..keep].trim_end_matches('-'));
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Milliseconds since the epoch, bumped past the previous value when two
/// calls land in the same millisecond.
fn next_stamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

pub fn next_job_id() -> String {
    format!("job-{}", next_stamp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
