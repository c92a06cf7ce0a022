//! nest_llms: provider-agnostic function-calling client.
//!
//! ```text
//! GenerateRequest ──► Provider::generate ──► GenerateResponse
//!   system + history       (Gemini)            text + tool calls
//! ```
//!
//! ```rust,no_run
//! use nest_llms::{GeminiProvider, GenerateRequest, Message, Provider};
//!
//! # async fn run() -> nest_llms::Result<()> {
//! let provider = GeminiProvider::from_env()?;
//! let request = GenerateRequest::new("gemini-2.5-flash", vec![Message::user("hello")]);
//! let response = provider.generate(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

pub use error::{Error, Result};
pub use provider::Provider;

pub use providers::GeminiProvider;
pub use providers::gemini::GeminiConfig;

pub use types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest,
    GenerateResponse, Headers, Message, ResponseContent, Role, ToolCall, ToolChoice,
    ToolDefinition, Usage,
};
