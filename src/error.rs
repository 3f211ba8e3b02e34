use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Assistant error: {0}")]
    AssistantError(#[from] LlmError),

    #[error("Vault error: {0}")]
    VaultError(String),
}

impl From<&str> for CompanionError {
    fn from(error: &str) -> Self {
        CompanionError::VaultError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompanionError>;
