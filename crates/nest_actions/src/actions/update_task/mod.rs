mod args;

pub use args::UpdateTaskArgs;

use crate::actions::{parse_args, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use async_trait::async_trait;
use nest_core::ActionPayload;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct UpdateTask;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for UpdateTask {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("Task updated")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: UpdateTaskArgs = parse_args(args)?;
        let (task_uid, patch) = a.into_patch();

        let task = ctx.store.update_task(&task_uid, patch).await?;
        let message = format!("Updated task \"{}\"", task.title);
        Ok(ActionOutput::new(Some(ActionPayload::Task(task)), message))
    }
}
