use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::{ActionCall, ActionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageStatus {
    /// Loading placeholder shown while the turn is in flight.
    Pending,
    Complete,
    Failed { error: String },
    TimedOut,
}

/// One visible entry in a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub status: MessageStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_calls: Option<Vec<ActionCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_results: Option<Vec<ActionResult>>,
}

impl ConversationMessage {
    fn new(role: Role, content: String, status: MessageStatus) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            status,
            timestamp: Utc::now(),
            action_calls: None,
            action_results: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), MessageStatus::Complete)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), MessageStatus::Complete)
    }

    pub fn placeholder() -> Self {
        Self::new(Role::Assistant, String::new(), MessageStatus::Pending)
    }

    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the audit trail of a turn. Empty batches leave both fields unset.
    pub fn with_actions(mut self, calls: Vec<ActionCall>, results: Vec<ActionResult>) -> Self {
        if !calls.is_empty() {
            self.action_calls = Some(calls);
        }
        if !results.is_empty() {
            self.action_results = Some(results);
        }
        self
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, MessageStatus::Pending)
    }
}
