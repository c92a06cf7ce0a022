mod args;

pub use args::DeleteListArgs;

use crate::actions::{parse_args, Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

pub struct DeleteList;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for DeleteList {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        Some("List deleted")
    }

    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let a: DeleteListArgs = parse_args(args)?;
        ctx.store.delete_list(&a.list_uid).await?;
        Ok(ActionOutput::new(None, "List has been deleted successfully"))
    }
}
