mod args;

pub use args::UpdateListArgs;

use crate::actions::{parse_args, to_position, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use crate::store::ListPatch;
use async_trait::async_trait;
use nest_core::ActionPayload;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct UpdateList;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for UpdateList {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("List updated")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: UpdateListArgs = parse_args(args)?;

        let patch = ListPatch {
            name: a.name,
            color: a.color,
            position: to_position(a.position),
        };

        let list = ctx.store.update_list(&a.list_uid, patch).await?;
        let message = format!("Updated list \"{}\"", list.name);
        Ok(ActionOutput::new(Some(ActionPayload::List(list)), message))
    }
}
