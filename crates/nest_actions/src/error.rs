use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Unknown function: {0}")]
    UnknownAction(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ActionError {
    /// Whether the failure came back from the project-data API rather than
    /// from local checks.
    pub fn is_remote(&self) -> bool {
        matches!(self, ActionError::Store(_))
    }
}
