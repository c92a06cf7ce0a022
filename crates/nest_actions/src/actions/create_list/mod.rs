mod args;

pub use args::CreateListArgs;

use crate::actions::{parse_args, to_position, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use crate::store::NewList;
use async_trait::async_trait;
use nest_core::{ActionPayload, DEFAULT_LIST_COLOR};
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct CreateList;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for CreateList {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("List created")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: CreateListArgs = parse_args(args)?;

        let request = NewList {
            project_uid: ctx.project_uid.to_string(),
            name: a.name,
            color: a.color.unwrap_or_else(|| DEFAULT_LIST_COLOR.to_string()),
            position: to_position(a.position),
        };

        let list = ctx.store.create_list(request).await?;
        let message = format!("Created list \"{}\"", list.name);
        Ok(ActionOutput::new(Some(ActionPayload::List(list)), message))
    }
}
