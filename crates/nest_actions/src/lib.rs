pub mod actions;
pub mod error;
pub mod notify;
pub mod registry;
pub mod store;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use nest_core::{ActionCall, ActionEvent, ActionResult, Notification};
use nest_observability::{action_span, record_duration};
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;
use tracing::Instrument;

pub use actions::{Action, ActionContext, ActionOutcome, ActionOutput};
pub use error::ActionError;
pub use notify::{ChannelNotifier, NoopNotifier, Notifier, TracingNotifier};
pub use registry::{ActionInfo, ActionRegistry, ActionSchema, ParamSpec, ParamType};
pub use store::{
    HttpProjectStore, InMemoryProjectStore, ListPatch, NewList, NewTask, ProjectStore,
    StoreError, StoreOp, TaskPatch,
};

/// Validates and runs model-proposed actions against one project.
pub struct ActionBus {
    project_uid: String,
    store: Arc<dyn ProjectStore>,
    notifier: Arc<dyn Notifier>,
    events: Option<mpsc::Sender<ActionEvent>>,
    registry: ActionRegistry,
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionBus {
    pub fn new(project_uid: impl Into<String>, store: Arc<dyn ProjectStore>) -> Self {
        let mut bus = Self {
            project_uid: project_uid.into(),
            store,
            notifier: Arc::new(TracingNotifier),
            events: None,
            registry: ActionRegistry::new(),
            actions: HashMap::new(),
        };
        bus.register_defaults();
        bus
    }

    fn register_defaults(&mut self) {
        for action in actions::builtin() {
            self.register_arc(action);
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Report `ActionStart` / `ActionDone` for every dispatch. Events are
    /// dropped when the channel is full.
    pub fn with_events(mut self, tx: mpsc::Sender<ActionEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    fn emit(&self, event: ActionEvent) {
        if let Some(tx) = &self.events {
            if let Err(e) = tx.try_send(event) {
                tracing::debug!("action event dropped: {}", e);
            }
        }
    }

    /// Add an action, replacing any built-in of the same name.
    pub fn register<A: Action + 'static>(&mut self, action: A) {
        self.register_arc(Arc::new(action));
    }

    fn register_arc(&mut self, action: Arc<dyn Action>) {
        self.registry.register(action.schema().clone());
        self.actions.insert(action.name().to_string(), action);
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn list_actions(&self) -> Vec<ActionInfo> {
        self.registry.manifest()
    }

    pub fn project_uid(&self) -> &str {
        &self.project_uid
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    /// Run one call. Never fails: every problem becomes a failed result.
    pub async fn dispatch(&self, call: &ActionCall) -> ActionResult {
        self.emit(ActionEvent::action_start(call.clone()));
        let span = action_span!(call.name.as_str(), call.id.as_str());
        let result = self.dispatch_inner(call).instrument(span).await;
        self.emit(ActionEvent::action_done(call.id.clone(), result.clone()));
        result
    }

    /// Run calls strictly in order, each one finished before the next
    /// starts. Returns one result per call at the same index.
    pub async fn dispatch_all(&self, calls: &[ActionCall]) -> Vec<ActionResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.dispatch(call).await);
        }
        results
    }

    async fn dispatch_inner(&self, call: &ActionCall) -> ActionResult {
        let start = Instant::now();

        let Some(action) = self.actions.get(&call.name) else {
            tracing::warn!("unknown action requested");
            return ActionResult::failure(ActionError::UnknownAction(call.name.clone()).to_string());
        };

        let outcome = self.run(action.as_ref(), &call.args).await;
        let elapsed = start.elapsed();
        record_duration("duration_ms", elapsed);
        let duration_ms = elapsed.as_millis() as u64;

        match outcome {
            Ok(output) => {
                tracing::info!(duration_ms, "{}", output.message);
                if let Some(title) = action.notice() {
                    self.notifier
                        .notify(Notification::success(title, output.message.clone()));
                }
                ActionResult::success(output.payload, output.message)
            }
            Err(err) => {
                tracing::warn!(duration_ms, error = %err, "action failed");
                if err.is_remote() {
                    self.notifier.notify(Notification::error("Error", err.to_string()));
                }
                ActionResult::failure(err.to_string())
            }
        }
    }

    async fn run(&self, action: &dyn Action, args: &JsonValue) -> ActionOutcome {
        let schema = self
            .registry
            .get(action.name())
            .ok_or_else(|| ActionError::UnknownAction(action.name().to_string()))?;
        schema.validate(args)?;

        let ctx = ActionContext {
            project_uid: &self.project_uid,
            store: self.store.as_ref(),
        };
        action.execute(args.clone(), &ctx).await
    }
}
