use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Branch name rejected by {rule} rule: {explanation}")]
    PolicyViolation { rule: String, explanation: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Unknown workflow kind: {0}")]
    UnknownWorkflowKind(String),

    #[error("Invalid workflow parameters: {0}")]
    InvalidParams(String),

    #[error("Workflow cancelled: {0}")]
    Cancelled(String),

    #[error("Command not allowed: {0}")]
    CommandNotAllowed(String),

    #[error("Command execution failed: {0}")]
    Shell(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for AppError {
    fn from(e: octocrab::Error) -> Self {
        match &e {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                AppError::NotFound(source.message.clone())
            }
            _ => AppError::Adapter(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
