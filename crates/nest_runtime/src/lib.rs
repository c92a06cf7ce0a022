//! Conversation runtime for nestpilot.
//!
//! The [`Orchestrator`] takes a user message through one model turn, runs
//! the proposed actions on an [`ActionBus`](nest_actions::ActionBus) and
//! returns a single assistant message with the full call/result trail.

pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod synthesis;

pub use config::{RuntimeConfig, TURN_TIMEOUT};
pub use context::{build_context, grounding_exchange, CONTEXT_ACK};
pub use conversation::{tool_definitions, Conversation, TurnReply};
pub use error::{Result, RuntimeError};
pub use orchestrator::{Orchestrator, ERROR_REPLY, TIMEOUT_REPLY, WELCOME_MESSAGE};
pub use prompt::build_system_prompt;
pub use synthesis::{synthesize, GENERIC_ACK};
