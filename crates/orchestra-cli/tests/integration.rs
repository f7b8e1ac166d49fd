#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn orchestra(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("orchestra").unwrap();
    cmd.current_dir(dir.path())
        .env("ORCHESTRA_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn wf(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wf").unwrap();
    cmd.current_dir(dir.path())
        .env("ORCHESTRA_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn read_json(dir: &TempDir, rel: &str) -> Value {
    let data = std::fs::read_to_string(dir.path().join(rel)).unwrap();
    serde_json::from_str(&data).unwrap()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// orchestra scaffold / plan
// ---------------------------------------------------------------------------

#[test]
fn scaffold_creates_jobs_dir() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir)
        .arg("scaffold")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: .orchestra ready"));
    assert!(dir.path().join(".orchestra/jobs").is_dir());

    // idempotent
    orchestra(&dir).arg("scaffold").assert().success();
}

#[test]
fn plan_writes_versioned_plan() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir)
        .args(["plan", "Ship the spring collection", "--lcp-ms", "2500"])
        .assert()
        .success();

    let plan = read_json(&dir, ".orchestra/plan.json");
    assert_eq!(plan["version"], 1);
    assert_eq!(plan["goal"], "Ship the spring collection");
    assert_eq!(plan["budgets"]["lcp_ms"], 2500.0);
    assert!(plan["budgets"].get("cls").is_none());
    assert!(plan["created_at"].is_string());
}

#[test]
fn plan_without_budgets_omits_them() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir).args(["plan", "Goal"]).assert().success();
    let plan = read_json(&dir, ".orchestra/plan.json");
    assert!(plan.get("budgets").is_none());
}

// ---------------------------------------------------------------------------
// orchestra route / split / slash / jobs
// ---------------------------------------------------------------------------

#[test]
fn route_prints_decision_and_writes_job() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir)
        .args(["route", "Fix checkout exception", "--constraint", "no new deps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("role:   debugger"))
        .stdout(predicate::str::contains("branch: fix/fix-checkout-exception"))
        .stdout(predicate::str::contains("rule:   debugger"));

    let job = read_json(&dir, ".orchestra/jobs/fix/fix-checkout-exception.json");
    assert_eq!(job["role"], "debugger");
    assert_eq!(job["title"], "Fix checkout exception");
    assert_eq!(job["inputs"]["constraints"][0], "no new deps");
    assert_eq!(job["inputs"]["copy"], "");
    assert_eq!(
        job["done_when"],
        serde_json::json!(["tests pass", "lighthouse ok", "review checklist ticked"])
    );
    assert!(job["id"].as_str().unwrap().starts_with("job-"));
    assert!(job.get("slash_origin").is_none());
}

#[test]
fn route_iot_title_gets_iot_prefix() {
    let dir = TempDir::new().unwrap();
    let output = orchestra(&dir)
        .args(["--json", "route", "RFID sensor calibration"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["job"]["role"], "coder");
    assert_eq!(body["rule"], "coder-iot");
    assert_eq!(body["job"]["branch"], "iot/rfid-sensor-calibration");
}

#[test]
fn split_writes_one_file_per_title() {
    let dir = TempDir::new().unwrap();
    let output = orchestra(&dir)
        .args([
            "--json",
            "split",
            "Design hero banner",
            "Add sitemap",
            "Build checkout page",
            "--constraint",
            "mobile first",
            "--copy",
            "Hero copy",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let jobs = stdout_json(&output);
    let jobs = jobs.as_array().unwrap();
    assert_eq!(jobs.len(), 3);
    let mut ids: Vec<&str> = jobs.iter().map(|j| j["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);

    assert!(dir.path().join(".orchestra/jobs/design/design-hero-banner.json").exists());
    assert!(dir.path().join(".orchestra/jobs/chore/add-sitemap.json").exists());
    assert!(dir.path().join(".orchestra/jobs/feature/build-checkout-page.json").exists());

    let hero = read_json(&dir, ".orchestra/jobs/design/design-hero-banner.json");
    assert_eq!(hero["inputs"]["copy"], "Hero copy");
    let sitemap = read_json(&dir, ".orchestra/jobs/chore/add-sitemap.json");
    assert_eq!(sitemap["inputs"]["copy"], "");
    assert_eq!(sitemap["inputs"]["constraints"][0], "mobile first");
}

#[test]
fn split_requires_titles() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir).arg("split").assert().failure();
}

#[test]
fn slash_db_creates_migration_job() {
    let dir = TempDir::new().unwrap();
    let output = orchestra(&dir)
        .args(["--json", "slash", "/db add users table"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let job = stdout_json(&output);
    assert_eq!(job["title"], "Supabase migration: add users table");
    assert_eq!(job["role"], "coder");
    assert_eq!(job["slash_origin"]["command"], "db");
    assert_eq!(job["slash_origin"]["action"], "add users table");
    assert_eq!(job["inputs"]["files"][0], "supabase/migrations/*");

    let branch = job["branch"].as_str().unwrap();
    assert!(dir
        .path()
        .join(format!(".orchestra/jobs/{branch}.json"))
        .exists());
}

#[test]
fn slash_rejects_plain_text() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir)
        .args(["slash", "add users table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn jobs_list_and_show() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir)
        .args(["route", "Deploy to Railway"])
        .assert()
        .success();

    orchestra(&dir)
        .args(["jobs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy/deploy-to-railway"));

    orchestra(&dir)
        .args(["jobs", "show", "deploy/deploy-to-railway"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deploy to Railway  [deploy]"));

    orchestra(&dir)
        .args(["jobs", "show", "fix/nope"])
        .assert()
        .failure();
}

#[test]
fn jobs_list_empty() {
    let dir = TempDir::new().unwrap();
    orchestra(&dir)
        .args(["jobs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs."));
}

// ---------------------------------------------------------------------------
// orchestra mcp
// ---------------------------------------------------------------------------

#[test]
fn mcp_server_answers_over_stdio() {
    let dir = TempDir::new().unwrap();
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"scaffold","arguments":{}}}"#,
    ]
    .join("\n");

    let output = orchestra(&dir)
        .arg("mcp")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["result"]["serverInfo"]["name"], "orchestra-mcp");
    assert_eq!(lines[1]["result"]["content"][0]["text"], "ok: .orchestra ready");
    assert!(dir.path().join(".orchestra/jobs").is_dir());
}

// ---------------------------------------------------------------------------
// wf import / report
// ---------------------------------------------------------------------------

fn write_flows(dir: &TempDir) {
    let flows = dir.path().join("flows");
    std::fs::create_dir_all(&flows).unwrap();
    std::fs::write(flows.join("01-intake.json"), r#"{"name": "intake"}"#).unwrap();
    std::fs::write(flows.join("02-broken.json"), "{ not json").unwrap();
    std::fs::write(flows.join("03-notify.json"), r#"{"name": "notify"}"#).unwrap();
}

#[test]
fn wf_import_missing_folder_prints_sentinel() {
    let dir = TempDir::new().unwrap();
    wf(&dir)
        .args(["import", "folder=missing", "tags=a"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("__WF_FOLDER_MISSING__"));
    assert!(!dir.path().join(".workflows/_import-report.json").exists());
}

#[test]
fn wf_import_requires_folder_and_tags() {
    let dir = TempDir::new().unwrap();
    write_flows(&dir);
    wf(&dir)
        .args(["import", "folder=flows"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("folder and tags are required"));
}

#[test]
fn wf_import_records_every_file_in_order() {
    let dir = TempDir::new().unwrap();
    write_flows(&dir);

    wf(&dir)
        .args(["import", "folder=flows", "tags=cursor,auto"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported/updated: 2, activated: 2, tags: [cursor, auto]",
        ));

    let report = read_json(&dir, ".workflows/_import-report.json");
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["file"], "flows/01-intake.json");
    assert_eq!(entries[0]["action"], "imported");
    assert_eq!(entries[0]["activated"], true);
    assert_eq!(entries[0]["tags"], serde_json::json!(["cursor", "auto"]));
    assert!(entries[0]["workflowId"]
        .as_str()
        .unwrap()
        .starts_with("workflow-"));

    assert_eq!(entries[1]["file"], "flows/02-broken.json");
    assert_eq!(entries[1]["action"], "error");
    assert_eq!(entries[1]["workflowId"], "");
    assert!(entries[1]["error"].is_string());

    assert_eq!(entries[2]["action"], "imported");
}

#[test]
fn wf_import_empty_folder_succeeds() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("empty")).unwrap();
    wf(&dir)
        .args(["import", "folder=empty", "tags=a"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No JSON files found in the specified folder",
        ));
    let report = read_json(&dir, ".workflows/_import-report.json");
    assert_eq!(report, serde_json::json!([]));
}

#[test]
fn wf_report_append_and_show() {
    let dir = TempDir::new().unwrap();
    let entry = r#"{"file":"flows/manual.json","workflowId":"42","action":"updated","activated":false,"tags":["manual"]}"#;
    wf(&dir)
        .args(["report", "append", entry])
        .assert()
        .success()
        .stdout("ok\n");
    wf(&dir)
        .args(["report", "append", entry])
        .assert()
        .success();

    let output = wf(&dir)
        .args(["--json", "report", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let entries = stdout_json(&output);
    assert_eq!(entries.as_array().unwrap().len(), 2);
    assert_eq!(entries[0]["workflowId"], "42");
}

#[test]
fn wf_report_append_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    wf(&dir)
        .args(["report", "append", "not json"])
        .assert()
        .failure();
    assert!(!dir.path().join(".workflows/_import-report.json").exists());
}
