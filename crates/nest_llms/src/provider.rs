//! Provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A hosted model that supports function calling.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `"gemini"`.
    fn provider_id(&self) -> &str;

    /// Headers sent with every request, merged with per-request ones.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        custom_headers.cloned().unwrap_or_default()
    }

    /// One non-streaming turn.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
