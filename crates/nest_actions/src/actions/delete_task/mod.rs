mod args;

pub use args::DeleteTaskArgs;

use crate::actions::{parse_args, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct DeleteTask;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for DeleteTask {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("Task deleted")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: DeleteTaskArgs = parse_args(args)?;
        ctx.store.delete_task(&a.task_uid).await?;
        Ok(ActionOutput::new(None, "Task has been deleted successfully"))
    }
}
