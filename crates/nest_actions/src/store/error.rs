use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The API answered but refused the operation.
    #[error("{0}")]
    Rejected(String),

    #[error("{entity} not found: {uid}")]
    NotFound { entity: &'static str, uid: String },

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, uid: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            uid: uid.into(),
        }
    }
}
