#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nest_actions::{ActionBus, InMemoryProjectStore};
use nest_llms::{
    FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Provider, ResponseContent,
    ToolCall, Usage,
};
use nest_runtime::{Orchestrator, RuntimeConfig};
use serde_json::Value as JsonValue;

pub const PROJECT: &str = "proj_1";

pub enum Step {
    Reply(GenerateResponse),
    Fail(nest_llms::Error),
    /// Never answers within the turn timeout.
    Hang,
}

/// Provider that plays back a fixed script and records every request.
#[derive(Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerateRequest) -> nest_llms::Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(response)) => Ok(response),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(nest_llms::Error::provider_error("hung"))
            }
            None => Err(nest_llms::Error::provider_error("script exhausted")),
        }
    }
}

pub fn text(reply: &str) -> Step {
    Step::Reply(GenerateResponse {
        content: vec![ResponseContent::Text {
            text: reply.to_string(),
        }],
        usage: Usage::default(),
        finish_reason: FinishReason::with_raw(FinishReasonKind::Stop, "STOP"),
    })
}

pub fn calls(calls: &[(&str, JsonValue)]) -> Step {
    Step::Reply(GenerateResponse {
        content: calls
            .iter()
            .enumerate()
            .map(|(i, (name, args))| {
                ResponseContent::ToolCall(ToolCall {
                    id: format!("call_{i}"),
                    name: name.to_string(),
                    arguments: args.clone(),
                    signature: None,
                })
            })
            .collect(),
        usage: Usage::default(),
        finish_reason: FinishReason::with_raw(FinishReasonKind::ToolCalls, "STOP"),
    })
}

/// Store with a "Backend" list holding one "Auth" task.
pub fn seeded_store() -> (Arc<InMemoryProjectStore>, String, String) {
    let store = Arc::new(InMemoryProjectStore::new(PROJECT, "Website"));
    let list_uid = store.add_list("Backend");
    let task_uid = store.add_task(&list_uid, "Auth").unwrap();
    (store, list_uid, task_uid)
}

pub fn orchestrator(
    store: Arc<InMemoryProjectStore>,
    steps: Vec<Step>,
) -> (Arc<Orchestrator>, Arc<ScriptedProvider>) {
    let provider = Arc::new(ScriptedProvider::new(steps));
    let bus = ActionBus::new(PROJECT, store);
    let config = RuntimeConfig::new().with_api_key("test").with_project(PROJECT);
    let orchestrator = Orchestrator::new(config, provider.clone(), bus);
    (Arc::new(orchestrator), provider)
}
