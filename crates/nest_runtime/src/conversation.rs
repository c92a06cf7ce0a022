//! One model conversation: system instruction, function manifest and an
//! explicit history of turns.

use std::sync::Arc;
use std::time::{Duration, Instant};

use nest_actions::ActionInfo;
use nest_core::{ActionCall, ActionResult};
use nest_llms::{GenerateOptions, GenerateRequest, Message, Provider, ToolDefinition};
use nest_observability::record_duration;
use serde_json::json;

use crate::config::{RuntimeConfig, TURN_TIMEOUT};
use crate::error::{Result, RuntimeError};

/// What the model produced for one user message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReply {
    pub text: String,
    pub calls: Vec<ActionCall>,
}

impl TurnReply {
    pub fn has_calls(&self) -> bool {
        !self.calls.is_empty()
    }
}

pub struct Conversation {
    provider: Arc<dyn Provider>,
    model: String,
    system_prompt: String,
    options: GenerateOptions,
    history: Vec<Message>,
    timeout: Duration,
    indeterminate: bool,
}

impl Conversation {
    /// Open a conversation whose history starts with `seed`.
    pub fn new(
        provider: Arc<dyn Provider>,
        config: &RuntimeConfig,
        system_prompt: impl Into<String>,
        tools: Vec<ToolDefinition>,
        seed: Vec<Message>,
    ) -> Self {
        let options = GenerateOptions::default()
            .with_temperature(config.temperature)
            .with_top_k(config.top_k)
            .with_top_p(config.top_p)
            .with_max_tokens(config.max_tokens)
            .with_tools(tools);

        Self {
            provider,
            model: config.model.clone(),
            system_prompt: system_prompt.into(),
            options,
            history: seed,
            timeout: TURN_TIMEOUT,
            indeterminate: false,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// True once a turn timed out or failed. The model may have seen the
    /// message even though no reply was committed.
    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Run one model turn.
    ///
    /// History is only extended when the turn completes. A timeout or
    /// provider error leaves it as it was and marks the conversation
    /// indeterminate.
    pub async fn send(&mut self, text: &str) -> Result<TurnReply> {
        let user = Message::user(text);
        let mut messages = self.history.clone();
        messages.push(user.clone());

        let request = GenerateRequest::new(self.model.clone(), messages)
            .with_system(self.system_prompt.clone())
            .with_options(self.options.clone());

        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.provider.generate(request)).await;
        record_duration("llm.duration_ms", start.elapsed());

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                self.indeterminate = true;
                return Err(RuntimeError::Llm(e));
            }
            Err(_) => {
                self.indeterminate = true;
                tracing::warn!(timeout_s = self.timeout.as_secs(), "model turn timed out");
                return Err(RuntimeError::Timeout(self.timeout));
            }
        };

        let text = response.text();
        let tool_calls = response.tool_calls();
        tracing::debug!(
            calls = tool_calls.len(),
            finish = ?response.finish_reason.unified,
            "model turn complete"
        );

        self.history.push(user);
        if !text.is_empty() || !tool_calls.is_empty() {
            self.history
                .push(Message::assistant_with_calls(text.clone(), &tool_calls));
        }

        let calls = tool_calls
            .into_iter()
            .map(|c| ActionCall::new(c.name, c.arguments).with_id(c.id))
            .collect();

        Ok(TurnReply { text, calls })
    }

    /// Append one function response per dispatched call.
    pub fn record_results(&mut self, calls: &[ActionCall], results: &[ActionResult]) {
        for (call, result) in calls.iter().zip(results) {
            let content = serde_json::to_value(result)
                .unwrap_or_else(|e| json!({ "success": false, "error": e.to_string() }));
            self.history
                .push(Message::tool_result(call.id.clone(), call.name.clone(), content));
        }
    }
}

/// Expose registered actions as model function declarations.
pub fn tool_definitions(actions: &[ActionInfo]) -> Vec<ToolDefinition> {
    actions
        .iter()
        .map(|a| ToolDefinition {
            name: a.name.clone(),
            description: a.description.clone(),
            parameters: a.parameters.clone(),
        })
        .collect()
}
