use super::{ActivateResult, ImportMode, ImportResult, ImportStatus, TagResult, WorkflowTools};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Stand-in for a workflow server that is not configured: every import
/// succeeds with a synthetic id, every activation and tag call succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedTools;

fn synthetic_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("workflow-{}-{suffix}", Utc::now().timestamp_millis())
}

#[async_trait]
impl WorkflowTools for SimulatedTools {
    async fn import(&self, _payload: &str, _mode: ImportMode) -> Result<ImportResult> {
        Ok(ImportResult {
            id: synthetic_id(),
            status: ImportStatus::Imported,
        })
    }

    async fn activate(&self, id: &str) -> Result<ActivateResult> {
        Ok(ActivateResult {
            id: Some(id.to_string()),
            activated: true,
            already_active: Some(false),
        })
    }

    async fn tag(&self, id: &str, tags: &[String]) -> Result<TagResult> {
        Ok(TagResult {
            id: Some(id.to_string()),
            tags: tags.to_vec(),
        })
    }
}
