use super::{required_str, OrchestraTool};
use orchestra_core::{job::Job, paths::Layout, OrchestraError};

pub struct SlashTool;

impl OrchestraTool for SlashTool {
    fn name(&self) -> &str {
        "slash"
    }

    fn description(&self) -> &str {
        "Expand a slash command (/db, /auth, /brand, /rfid, /lang, /release) into a job file"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["input"],
            "properties": {
                "input": {
                    "type": "string",
                    "description": "Command line such as '/db add users table'"
                }
            }
        })
    }

    fn call(&self, args: serde_json::Value, layout: &Layout) -> Result<serde_json::Value, String> {
        let input = required_str(&args, "input")?;
        let job = Job::from_slash(input)
            .ok_or_else(|| OrchestraError::NotSlashCommand(input.to_string()).to_string())?;
        let path = job.save(layout).map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "path": path.display().to_string(),
            "job": job,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn db_command_writes_migration_job() {
        let dir = TempDir::new().unwrap();
        let layout = Layout::new(dir.path());
        let out = SlashTool
            .call(serde_json::json!({"input": "/db add users table"}), &layout)
            .unwrap();
        let job = &out["job"];
        assert_eq!(job["title"], "Supabase migration: add users table");
        assert_eq!(job["slash_origin"]["command"], "db");
        assert!(job["inputs"]["constraints"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("generate .sql migration")));

        let branch = job["branch"].as_str().unwrap();
        assert!(Job::load(&layout, branch).is_ok());
    }

    #[test]
    fn plain_text_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = SlashTool
            .call(
                serde_json::json!({"input": "add users table"}),
                &Layout::new(dir.path()),
            )
            .unwrap_err();
        assert!(err.contains("add users table"));
    }
}
