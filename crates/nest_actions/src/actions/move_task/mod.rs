//! Moves a task by deleting it and recreating it in the target list.
//!
//! The two calls are not atomic: if the create fails after the delete
//! succeeded, the task is gone. Both the task and the target list are looked
//! up first so a bad identifier never mutates anything.

mod args;

pub use args::MoveTaskArgs;

use crate::actions::{parse_args, to_position, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::error::ActionError;
use crate::registry::{parse_action_schema, ActionSchema};
use crate::store::NewTask;
use async_trait::async_trait;
use nest_core::{ActionPayload, ProjectSnapshot};
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct MoveTask;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for MoveTask {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("Task moved")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: MoveTaskArgs = parse_args(args)?;

        let snapshot = ProjectSnapshot::from(ctx.store.fetch_project(ctx.project_uid).await?);
        let task = snapshot
            .find_task(&a.task_uid)
            .cloned()
            .ok_or_else(|| ActionError::TaskNotFound(a.task_uid.clone()))?;
        let target = snapshot
            .find_list(&a.target_list_uid)
            .ok_or_else(|| ActionError::ListNotFound(a.target_list_uid.clone()))?;
        let target_name = target.name.clone();

        ctx.store.delete_task(&task.task_uid).await?;

        let recreated = NewTask {
            list_uid: a.target_list_uid,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            color: task.color,
            position: to_position(a.position),
            due_date: task.due_date,
            is_completed: task.is_completed,
        };
        let moved = ctx.store.create_task(recreated).await?;

        let message = format!("Moved task \"{}\" to \"{}\"", moved.title, target_name);
        Ok(ActionOutput::new(Some(ActionPayload::Task(moved)), message))
    }
}
