use thiserror::Error;

/// Printed (and embedded in the error message) when an import folder is absent.
pub const WF_FOLDER_MISSING: &str = "__WF_FOLDER_MISSING__";

#[derive(Debug, Error)]
pub enum OrchestraError {
    #[error("__WF_FOLDER_MISSING__: Folder {0} does not exist")]
    FolderMissing(String),

    #[error("not a slash command: {0:?}")]
    NotSlashCommand(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    #[error("{0} not found on PATH")]
    ProgramNotFound(&'static str),

    #[error("{program} failed: {message}")]
    Command {
        program: &'static str,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl OrchestraError {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        OrchestraError::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestraError>;
