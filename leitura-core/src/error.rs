//! Error types for the leitura ecosystem.

use thiserror::Error;

/// Errors that can occur in leitura operations.
#[derive(Error, Debug)]
pub enum LeituraError {
    #[error("Unknown reading plan: {0}")]
    PlanNotFound(String),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Remote request timed out after {0}s")]
    RemoteTimeout(u64),

    #[error("Local cache error: {0}")]
    LocalCache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for LeituraError {
    fn from(e: reqwest::Error) -> Self {
        LeituraError::Remote(e.to_string())
    }
}

impl From<serde_json::Error> for LeituraError {
    fn from(e: serde_json::Error) -> Self {
        LeituraError::Serialization(e.to_string())
    }
}

/// Result type alias for leitura operations.
pub type LeituraResult<T> = Result<T, LeituraError>;
