use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ORCHESTRA_DIR: &str = ".orchestra";
pub const JOBS_DIR: &str = ".orchestra/jobs";
pub const PLAN_FILE: &str = ".orchestra/plan.json";
pub const CONFIG_FILE: &str = ".orchestra/config.yaml";

pub const WORKFLOWS_DIR: &str = ".workflows";
pub const IMPORT_REPORT_FILE: &str = ".workflows/_import-report.json";

pub const MCP_REGISTRY_FILE: &str = ".mcp.json";

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Every on-disk location the tools read or write, resolved against one root.
///
/// Components receive a `Layout` instead of consulting the process working
/// directory, so tests can point the whole system at a temp dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub jobs_dir: PathBuf,
    pub plan_file: PathBuf,
    pub config_file: PathBuf,
    pub workflows_dir: PathBuf,
    pub report_file: PathBuf,
    pub mcp_registry: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            jobs_dir: root.join(JOBS_DIR),
            plan_file: root.join(PLAN_FILE),
            config_file: root.join(CONFIG_FILE),
            workflows_dir: root.join(WORKFLOWS_DIR),
            report_file: root.join(IMPORT_REPORT_FILE),
            mcp_registry: root.join(MCP_REGISTRY_FILE),
            root,
        }
    }

    /// Path of the job file for `branch`. The branch prefix becomes a subdirectory.
    pub fn job_path(&self, branch: &str) -> PathBuf {
        self.jobs_dir.join(format!("{branch}.json"))
    }

    /// Resolve a user-supplied folder relative to the root. Absolute paths pass through.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Display `path` relative to the root when it lives under it.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths() {
        let layout = Layout::new("/tmp/proj");
        assert_eq!(layout.jobs_dir, PathBuf::from("/tmp/proj/.orchestra/jobs"));
        assert_eq!(layout.plan_file, PathBuf::from("/tmp/proj/.orchestra/plan.json"));
        assert_eq!(
            layout.report_file,
            PathBuf::from("/tmp/proj/.workflows/_import-report.json")
        );
        assert_eq!(
            layout.job_path("feature/add-users"),
            PathBuf::from("/tmp/proj/.orchestra/jobs/feature/add-users.json")
        );
    }

    #[test]
    fn relative_strips_root() {
        let layout = Layout::new("/tmp/proj");
        assert_eq!(
            layout.relative(Path::new("/tmp/proj/flows/a.json")),
            "flows/a.json"
        );
        assert_eq!(layout.relative(Path::new("/elsewhere/b.json")), "/elsewhere/b.json");
    }
}
