mod args;

pub use args::CreateTaskArgs;

use crate::actions::{parse_args, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use crate::store::NewTask;
use async_trait::async_trait;
use nest_core::{ActionPayload, TaskStatus, DEFAULT_TASK_COLOR};
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct CreateTask;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for CreateTask {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("Task created")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: CreateTaskArgs = parse_args(args)?;
        let status = a.status.unwrap_or_default();

        let request = NewTask {
            list_uid: a.list_uid,
            title: a.title,
            description: a.description.unwrap_or_default(),
            status,
            priority: a.priority.unwrap_or_default(),
            color: a.color.unwrap_or_else(|| DEFAULT_TASK_COLOR.to_string()),
            position: None,
            due_date: a.due_date.filter(|d| !d.trim().is_empty()),
            is_completed: status == TaskStatus::Completed,
        };

        let task = ctx.store.create_task(request).await?;
        let message = format!("Created task \"{}\"", task.title);
        Ok(ActionOutput::new(Some(ActionPayload::Task(task)), message))
    }
}
