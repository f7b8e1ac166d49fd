//! Batch import of workflow definition files into an external automation
//! system.
//!
//! Every file gets exactly one [`ImportReportEntry`], in enumeration order.
//! A file that cannot be read, parsed or imported becomes an `error` entry;
//! activation and tagging failures only degrade that file's entry. Nothing a
//! single file does stops the batch.

pub mod simulated;

use crate::error::{OrchestraError, Result};
use crate::io;
use crate::paths::Layout;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use simulated::SimulatedTools;

pub const NO_FILES_MESSAGE: &str = "No JSON files found in the specified folder";

// ---------------------------------------------------------------------------
// Remote tool results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Imported,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Upsert,
}

impl ImportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportMode::Upsert => "upsert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub id: String,
    pub status: ImportStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub activated: bool,
    #[serde(default)]
    pub already_active: Option<bool>,
}

impl ActivateResult {
    pub fn is_active(&self) -> bool {
        self.activated || self.already_active.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The three remote operations a workflow import needs.
#[async_trait]
pub trait WorkflowTools: Send + Sync {
    async fn import(&self, payload: &str, mode: ImportMode) -> Result<ImportResult>;
    async fn activate(&self, id: &str) -> Result<ActivateResult>;
    async fn tag(&self, id: &str, tags: &[String]) -> Result<TagResult>;

    /// Release the backend once the batch is done.
    async fn close(&self) {}
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    Imported,
    Updated,
    Error,
}

impl ReportAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportAction::Imported => "imported",
            ReportAction::Updated => "updated",
            ReportAction::Error => "error",
        }
    }
}

impl From<ImportStatus> for ReportAction {
    fn from(status: ImportStatus) -> Self {
        match status {
            ImportStatus::Imported => ReportAction::Imported,
            ImportStatus::Updated => ReportAction::Updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReportEntry {
    pub file: String,
    #[serde(rename = "workflowId")]
    pub workflow_id: String,
    pub action: ReportAction,
    pub activated: bool,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportReportEntry {
    pub fn failed(file: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            file: file.into(),
            workflow_id: String::new(),
            action: ReportAction::Error,
            activated: false,
            tags: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.action == ReportAction::Error
    }
}

/// Entries plus the running totals accumulated while producing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub entries: Vec<ImportReportEntry>,
    /// Entries whose action is imported or updated.
    pub imported: usize,
    pub activated: usize,
    pub tags: Vec<String>,
}

impl ImportReport {
    fn push(&mut self, entry: ImportReportEntry) {
        if matches!(entry.action, ReportAction::Imported | ReportAction::Updated) {
            self.imported += 1;
        }
        if entry.activated {
            self.activated += 1;
        }
        self.entries.push(entry);
    }

    pub fn errors(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error()).count()
    }

    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return NO_FILES_MESSAGE.to_string();
        }
        format!(
            "Imported/updated: {}, activated: {}, tags: [{}]",
            self.imported,
            self.activated,
            self.tags.join(", ")
        )
    }
}

pub fn write_report(layout: &Layout, entries: &[ImportReportEntry]) -> Result<()> {
    io::write_json(&layout.report_file, entries)
}

/// Entries from the report file; an absent file reads as empty.
pub fn read_report(layout: &Layout) -> Result<Vec<ImportReportEntry>> {
    if !layout.report_file.exists() {
        return Ok(Vec::new());
    }
    io::read_json(&layout.report_file)
}

/// Append one entry to the report file, creating it when missing.
pub fn append_report_entry(layout: &Layout, entry: ImportReportEntry) -> Result<usize> {
    let mut entries = read_report(layout)?;
    entries.push(entry);
    write_report(layout, &entries)?;
    Ok(entries.len())
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Split a comma-separated tag list, trimming and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every `*.json` file below `folder`, sorted by path, at most `limit` of them.
/// Entries that cannot be read are logged and skipped.
pub fn discover_workflow_files(folder: &Path, limit: usize) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    folder = %folder.display(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "json") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files.truncate(limit);
    files
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Import `files` strictly in order. Never fails: per-file problems are
/// recorded in the returned report.
pub async fn import_files(
    layout: &Layout,
    files: &[PathBuf],
    tags: &[String],
    tools: &dyn WorkflowTools,
) -> ImportReport {
    let mut report = ImportReport {
        tags: tags.to_vec(),
        ..ImportReport::default()
    };
    for path in files {
        let file = layout.relative(path);
        let entry = match import_one(path, &file, tags, tools).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "workflow import failed");
                ImportReportEntry::failed(file, e)
            }
        };
        report.push(entry);
    }
    report
}

async fn import_one(
    path: &Path,
    file: &str,
    tags: &[String],
    tools: &dyn WorkflowTools,
) -> Result<ImportReportEntry> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str::<serde_json::Value>(&content)?;

    let imported = tools.import(&content, ImportMode::Upsert).await?;
    tracing::info!(file = %file, id = %imported.id, status = ?imported.status, "workflow imported");

    let activated = match tools.activate(&imported.id).await {
        Ok(result) => result.is_active(),
        Err(e) => {
            tracing::warn!(id = %imported.id, error = %e, "failed to activate workflow");
            false
        }
    };

    let applied_tags = match tools.tag(&imported.id, tags).await {
        Ok(_) => tags.to_vec(),
        Err(e) => {
            tracing::warn!(id = %imported.id, error = %e, "failed to tag workflow");
            Vec::new()
        }
    };

    Ok(ImportReportEntry {
        file: file.to_string(),
        workflow_id: imported.id,
        action: imported.status.into(),
        activated,
        tags: applied_tags,
        error: None,
    })
}

/// Resolve `folder` against the root, failing with
/// [`OrchestraError::FolderMissing`] when it is not a directory.
pub fn check_folder(layout: &Layout, folder: &str) -> Result<PathBuf> {
    let path = layout.resolve(folder);
    if !path.is_dir() {
        return Err(OrchestraError::FolderMissing(folder.to_string()));
    }
    Ok(path)
}

/// Full batch run over `folder` (relative to the layout root).
///
/// Fails fast with [`OrchestraError::FolderMissing`] before touching the
/// filesystem. Otherwise the report file is reset to `[]`, files are
/// imported and the complete report is written once at the end.
pub async fn import_folder(
    layout: &Layout,
    folder: &str,
    tags: &[String],
    max_files: usize,
    tools: &dyn WorkflowTools,
) -> Result<ImportReport> {
    let folder_path = check_folder(layout, folder)?;

    write_report(layout, &[])?;

    let files = discover_workflow_files(&folder_path, max_files);
    if files.is_empty() {
        tracing::info!(folder, "no workflow files found");
        return Ok(ImportReport {
            tags: tags.to_vec(),
            ..ImportReport::default()
        });
    }

    let report = import_files(layout, &files, tags, tools).await;
    write_report(layout, &report.entries)?;
    tracing::info!(
        files = report.entries.len(),
        imported = report.imported,
        activated = report.activated,
        errors = report.errors(),
        "workflow import finished"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory tools. Payloads containing `"fail_import"` are rejected;
    /// ids listed in `fail_activate` / `fail_tag` fail those steps.
    #[derive(Default)]
    struct ScriptedTools {
        fail_activate: Vec<String>,
        fail_tag: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTools {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WorkflowTools for ScriptedTools {
        async fn import(&self, payload: &str, mode: ImportMode) -> Result<ImportResult> {
            let value: serde_json::Value = serde_json::from_str(payload)?;
            let name = value["name"].as_str().unwrap_or("unnamed").to_string();
            self.calls
                .lock()
                .unwrap()
                .push(format!("import:{name}:{}", mode.as_str()));
            if payload.contains("fail_import") {
                return Err(OrchestraError::tool("workflows.import", "rejected"));
            }
            let status = if value["id"].is_string() {
                ImportStatus::Updated
            } else {
                ImportStatus::Imported
            };
            Ok(ImportResult {
                id: format!("wf-{name}"),
                status,
            })
        }

        async fn activate(&self, id: &str) -> Result<ActivateResult> {
            self.calls.lock().unwrap().push(format!("activate:{id}"));
            if self.fail_activate.iter().any(|f| f == id) {
                return Err(OrchestraError::tool("workflows.activate", "boom"));
            }
            Ok(ActivateResult {
                id: Some(id.to_string()),
                activated: false,
                already_active: Some(true),
            })
        }

        async fn tag(&self, id: &str, tags: &[String]) -> Result<TagResult> {
            self.calls.lock().unwrap().push(format!("tag:{id}"));
            if self.fail_tag.iter().any(|f| f == id) {
                return Err(OrchestraError::tool("workflows.tag", "boom"));
            }
            Ok(TagResult {
                id: Some(id.to_string()),
                tags: tags.to_vec(),
            })
        }
    }

    fn write(dir: &TempDir, rel: &str, body: &str) {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn tags() -> Vec<String> {
        vec!["cursor".to_string(), "auto".to_string()]
    }

    #[test]
    fn parse_tags_trims_and_drops_blanks() {
        assert_eq!(
            parse_tags(" cursor, auto,,release ,"),
            vec!["cursor", "auto", "release"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn discover_is_recursive_sorted_and_capped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flows/b.json", "{}");
        write(&dir, "flows/a.json", "{}");
        write(&dir, "flows/nested/c.json", "{}");
        write(&dir, "flows/notes.txt", "x");
        let files = discover_workflow_files(&dir.path().join("flows"), 200);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["flows/a.json", "flows/b.json", "flows/nested/c.json"]
        );
        assert_eq!(
            discover_workflow_files(&dir.path().join("flows"), 2).len(),
            2
        );
    }

    #[test]
    fn discover_skips_entries_it_cannot_walk() {
        let dir = TempDir::new().unwrap();
        assert!(discover_workflow_files(&dir.path().join("absent"), 200).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn discover_keeps_readable_files_next_to_locked_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(&dir, "flows/a.json", "{}");
        write(&dir, "flows/locked/b.json", "{}");
        write(&dir, "flows/z.json", "{}");
        let locked = dir.path().join("flows/locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        let files = discover_workflow_files(&dir.path().join("flows"), 200);
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(files.contains(&dir.path().join("flows/a.json")));
        assert!(files.contains(&dir.path().join("flows/z.json")));
    }

    #[tokio::test]
    async fn malformed_file_becomes_error_entry_in_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flows/1.json", r#"{"name": "one"}"#);
        write(&dir, "flows/2.json", r#"{"name": "two", "#);
        write(&dir, "flows/3.json", r#"{"name": "three", "id": "x"}"#);
        let layout = Layout::new(dir.path());
        let tools = ScriptedTools::default();

        let report = import_folder(&layout, "flows", &tags(), 200, &tools)
            .await
            .unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[0].file, "flows/1.json");
        assert_eq!(report.entries[0].action, ReportAction::Imported);
        assert_eq!(report.entries[1].file, "flows/2.json");
        assert_eq!(report.entries[1].action, ReportAction::Error);
        assert!(!report.entries[1].error.as_deref().unwrap().is_empty());
        assert!(report.entries[1].workflow_id.is_empty());
        assert_eq!(report.entries[2].action, ReportAction::Updated);
        assert_eq!(report.imported, 2);
        assert_eq!(report.activated, 2);
        assert_eq!(
            report.summary(),
            "Imported/updated: 2, activated: 2, tags: [cursor, auto]"
        );

        // The malformed file never reached the remote side.
        assert!(!tools.calls().iter().any(|c| c.contains("two")));

        let on_disk = read_report(&layout).unwrap();
        assert_eq!(on_disk, report.entries);
    }

    #[tokio::test]
    async fn activation_and_tag_failures_are_not_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flows/a.json", r#"{"name": "a"}"#);
        write(&dir, "flows/b.json", r#"{"name": "b"}"#);
        let layout = Layout::new(dir.path());
        let tools = ScriptedTools {
            fail_activate: vec!["wf-a".to_string()],
            fail_tag: vec!["wf-a".to_string()],
            ..ScriptedTools::default()
        };

        let report = import_folder(&layout, "flows", &tags(), 200, &tools)
            .await
            .unwrap();

        let a = &report.entries[0];
        assert_eq!(a.action, ReportAction::Imported);
        assert!(!a.activated);
        assert!(a.tags.is_empty());
        assert!(a.error.is_none());

        let b = &report.entries[1];
        assert!(b.activated);
        assert_eq!(b.tags, tags());

        assert_eq!(report.imported, 2);
        assert_eq!(report.activated, 1);
        assert_eq!(
            tools.calls(),
            vec![
                "import:a:upsert",
                "activate:wf-a",
                "tag:wf-a",
                "import:b:upsert",
                "activate:wf-b",
                "tag:wf-b",
            ]
        );
    }

    #[tokio::test]
    async fn import_failure_is_an_error_entry() {
        let dir = TempDir::new().unwrap();
        write(&dir, "flows/a.json", r#"{"name": "a", "note": "fail_import"}"#);
        write(&dir, "flows/b.json", r#"{"name": "b"}"#);
        let layout = Layout::new(dir.path());
        let tools = ScriptedTools::default();

        let report = import_folder(&layout, "flows", &tags(), 200, &tools)
            .await
            .unwrap();
        assert!(report.entries[0].is_error());
        assert!(report.entries[0]
            .error
            .as_deref()
            .unwrap()
            .contains("rejected"));
        assert_eq!(report.entries[1].action, ReportAction::Imported);
        assert_eq!(report.errors(), 1);
    }

    #[tokio::test]
    async fn missing_folder_short_circuits() {
        let dir = TempDir::new().unwrap();
        let layout = Layout::new(dir.path());
        let tools = ScriptedTools::default();

        let err = import_folder(&layout, "nope", &tags(), 200, &tools)
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestraError::FolderMissing(ref f) if f == "nope"));
        assert!(err.to_string().starts_with(crate::error::WF_FOLDER_MISSING));
        assert!(!layout.report_file.exists());
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_folder_is_trivial_success() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("flows")).unwrap();
        let layout = Layout::new(dir.path());

        let report = import_folder(&layout, "flows", &tags(), 200, &ScriptedTools::default())
            .await
            .unwrap();
        assert!(report.entries.is_empty());
        assert_eq!(report.summary(), NO_FILES_MESSAGE);
        assert!(read_report(&layout).unwrap().is_empty());
    }

    #[tokio::test]
    async fn max_files_caps_the_batch() {
        let dir = TempDir::new().unwrap();
        for i in 0..5 {
            write(&dir, &format!("flows/{i}.json"), &format!(r#"{{"name": "n{i}"}}"#));
        }
        let layout = Layout::new(dir.path());
        let report = import_folder(&layout, "flows", &[], 3, &ScriptedTools::default())
            .await
            .unwrap();
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.summary(), "Imported/updated: 3, activated: 3, tags: []");
    }

    #[test]
    fn append_creates_and_extends_report() {
        let dir = TempDir::new().unwrap();
        let layout = Layout::new(dir.path());
        let entry = ImportReportEntry::failed("flows/x.json", "bad");
        assert_eq!(append_report_entry(&layout, entry.clone()).unwrap(), 1);
        assert_eq!(append_report_entry(&layout, entry).unwrap(), 2);

        let raw: serde_json::Value = io::read_json(&layout.report_file).unwrap();
        assert_eq!(raw[0]["workflowId"], "");
        assert_eq!(raw[0]["action"], "error");
        assert_eq!(raw[1]["error"], "bad");
    }
}
