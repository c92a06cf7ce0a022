//! Runtime error types

use std::time::Duration;

use nest_actions::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("A message is already being processed")]
    Busy,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Missing model credential: set {0}")]
    MissingCredential(String),

    #[error("LLM error: {0}")]
    Llm(#[from] nest_llms::Error),

    #[error("Model turn timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Project data error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RuntimeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RuntimeError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
